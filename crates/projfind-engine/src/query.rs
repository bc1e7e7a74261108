use std::collections::HashSet;

use tracing::debug;

use projfind_core::predicate::{fold_case, MatchPredicate, WordGroup};
use projfind_core::types::SearchMode;
use projfind_lexicon::SynonymResolver;

/// Drops candidates that fold to one already kept. Containment is
/// case-insensitive, so a repeat never changes what a group matches.
fn unique_candidates(candidates: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates.into_iter().filter(|c| seen.insert(fold_case(c))).collect()
}

/// Turns query words into a `MatchPredicate`.
///
/// Every word becomes one OR-group over its candidates (the word itself in
/// exact mode, its synonym set in smart mode); groups are ANDed and the
/// year, when present, is ANDed last. Repeated words (ignoring case) add
/// nothing under AND and are kept once.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build<S: AsRef<str>>(
        words: &[S],
        year: Option<&str>,
        mode: SearchMode,
        resolver: &mut SynonymResolver<'_>,
    ) -> MatchPredicate {
        match mode {
            SearchMode::Exact => Self::exact(words, year),
            SearchMode::Smart => Self::smart(words, year, resolver),
        }
    }

    pub fn exact<S: AsRef<str>>(words: &[S], year: Option<&str>) -> MatchPredicate {
        Self::assemble(words, year, |w| vec![w.to_string()])
    }

    pub fn smart<S: AsRef<str>>(words: &[S], year: Option<&str>, resolver: &mut SynonymResolver<'_>) -> MatchPredicate {
        Self::assemble(words, year, |w| resolver.resolve(w).into_iter().collect())
    }

    fn assemble<S, F>(words: &[S], year: Option<&str>, mut candidates: F) -> MatchPredicate
    where
        S: AsRef<str>,
        F: FnMut(&str) -> Vec<String>,
    {
        let mut seen = HashSet::new();
        let groups: Vec<WordGroup> = words
            .iter()
            .map(|w| w.as_ref())
            .filter(|w| !w.is_empty() && seen.insert(fold_case(w)))
            .map(|w| WordGroup::new(w, unique_candidates(candidates(w))))
            .collect();
        let predicate = MatchPredicate::new(groups, year.map(ToString::to_string));
        debug!(groups = predicate.groups.len(), checks = predicate.check_count(), year = ?predicate.year, "built predicate");
        predicate
    }
}
