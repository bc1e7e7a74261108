//! Lexical dictionaries and the synonym resolver built on top of them.

pub mod http;
pub mod resolver;
pub mod wordnet;

use std::path::Path;

use tracing::{info, warn};

use projfind_core::config::{resolve_with_base, LexiconSettings, LexiconSource};
use projfind_core::error::{Error, Result};
use projfind_core::traits::LexicalDictionary;
use projfind_core::types::Synset;

pub use http::HttpThesaurus;
pub use resolver::SynonymResolver;
pub use wordnet::WordNetDictionary;

/// A dictionary that is never available. Every lookup fails, so smart
/// search runs in degraded mode with each word standing for itself.
#[derive(Debug, Clone)]
pub struct NoDictionary {
    reason: String,
}

impl NoDictionary {
    pub fn new(reason: impl Into<String>) -> Self { Self { reason: reason.into() } }
}

impl LexicalDictionary for NoDictionary {
    fn synsets_of(&self, _word: &str) -> Result<Vec<Synset>> {
        Err(Error::DictionaryUnavailable(self.reason.clone()))
    }
}

/// Picks the dictionary named by `settings.source`.
///
/// Never fails: a dictionary that cannot be set up is replaced by a
/// `NoDictionary` carrying the reason, which the resolver reports as degraded.
pub fn open_dictionary(settings: &LexiconSettings, base: &Path) -> Box<dyn LexicalDictionary> {
    match settings.source {
        LexiconSource::Wordnet => {
            let path = resolve_with_base(base, &settings.wordnet_path);
            match WordNetDictionary::load(&path) {
                Ok(dict) if dict.is_empty() => {
                    warn!(path = %path.display(), "WordNet dictionary has no synsets, smart search will be degraded");
                    Box::new(NoDictionary::new(format!("no synsets in {}", path.display())))
                }
                Ok(dict) => { info!(path = %path.display(), synsets = dict.len(), "loaded WordNet dictionary"); Box::new(dict) }
                Err(e) => { warn!(error = %e, "WordNet dictionary unavailable, smart search will be degraded"); Box::new(NoDictionary::new(e.to_string())) }
            }
        }
        LexiconSource::Http => match HttpThesaurus::new(settings) {
            Ok(thesaurus) => { info!(endpoint = %settings.endpoint, "using HTTP thesaurus"); Box::new(thesaurus) }
            Err(e) => { warn!(error = %e, "HTTP thesaurus unavailable, smart search will be degraded"); Box::new(NoDictionary::new(e.to_string())) }
        },
        LexiconSource::None => Box::new(NoDictionary::new("lexicon disabled by configuration")),
    }
}
