use crate::error::Result;
use crate::predicate::MatchPredicate;
use crate::types::{ProjectRecord, Synset};

/// Read side of the project corpus, plus the bulk insert used by ingestion.
///
/// Any error returned here is a hard failure; the engine does not mask it.
pub trait CorpusStore: Send + Sync {
    fn query(&self, predicate: &MatchPredicate) -> Result<Vec<ProjectRecord>>;
    /// Distinct years, newest first.
    fn years(&self) -> Result<Vec<String>>;
    fn count(&self) -> Result<usize>;
    fn insert(&self, records: &[ProjectRecord]) -> Result<usize>;
}

/// Key-value settings (the banner text lives here).
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// External thesaurus. Errors are expected and are turned into degraded
/// synonym resolution by the caller.
pub trait LexicalDictionary: Send + Sync {
    fn synsets_of(&self, word: &str) -> Result<Vec<Synset>>;
}
