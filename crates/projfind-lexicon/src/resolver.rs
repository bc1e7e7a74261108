use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use projfind_core::traits::LexicalDictionary;

/// Expands words to their synonym sets for the duration of one request.
///
/// Results are memoized by lowercased word, so repeated resolution within a
/// request is idempotent and hits the dictionary once. A failed lookup
/// yields `{word}` and marks the resolver degraded.
pub struct SynonymResolver<'a> {
    dictionary: &'a dyn LexicalDictionary,
    memo: HashMap<String, BTreeSet<String>>,
    degraded: BTreeSet<String>,
}

impl<'a> SynonymResolver<'a> {
    pub fn new(dictionary: &'a dyn LexicalDictionary) -> Self {
        Self { dictionary, memo: HashMap::new(), degraded: BTreeSet::new() }
    }

    /// The sorted synonym set of `word`, always containing `word` lowercased.
    pub fn resolve(&mut self, word: &str) -> BTreeSet<String> {
        let key = word.to_lowercase();
        if let Some(hit) = self.memo.get(&key) {
            return hit.clone();
        }
        let mut terms = BTreeSet::from([key.clone()]);
        match self.dictionary.synsets_of(word) {
            Ok(synsets) => {
                for lemma in synsets.iter().flat_map(|s| s.lemmas.iter()) {
                    let term = lemma.replace('_', " ").trim().to_lowercase();
                    if !term.is_empty() { terms.insert(term); }
                }
            }
            Err(e) => {
                warn!(word, error = %e, "synonym lookup failed, using the word alone");
                self.degraded.insert(key.clone());
            }
        }
        self.memo.insert(key, terms.clone());
        terms
    }

    /// Union of the synonym sets of every word.
    pub fn resolve_all<S: AsRef<str>>(&mut self, words: &[S]) -> BTreeSet<String> {
        words.iter().flat_map(|w| self.resolve(w.as_ref())).collect()
    }

    pub fn is_degraded(&self) -> bool { !self.degraded.is_empty() }

    /// Words whose lookup failed, lowercased.
    pub fn degraded_words(&self) -> impl Iterator<Item = &str> {
        self.degraded.iter().map(String::as_str)
    }
}
