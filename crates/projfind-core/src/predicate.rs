//! Set-based match predicate over the searchable fields of a project.
//!
//! A predicate is an AND of word groups. Each group is an OR over its
//! candidates, where a candidate matches when it is a case-insensitive
//! substring of the title or of the abstract. An optional year filter is
//! ANDed on top as an exact equality test.

use serde::{Deserialize, Serialize};

use crate::types::ProjectRecord;

/// The OR-group produced for one query word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroup {
    pub word: String,
    pub candidates: Vec<String>,
}

impl WordGroup {
    pub fn new(word: impl Into<String>, candidates: Vec<String>) -> Self {
        Self { word: word.into(), candidates }
    }

    /// An empty candidate list matches everything rather than nothing.
    pub fn is_unconstrained(&self) -> bool {
        self.candidates.iter().all(|c| c.is_empty())
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        let title = fold_case(&record.title);
        let abstract_text = fold_case(&record.abstract_text);
        self.candidates
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| fold_case(c))
            .any(|c| title.contains(&c) || abstract_text.contains(&c))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPredicate {
    pub groups: Vec<WordGroup>,
    pub year: Option<String>,
}

impl MatchPredicate {
    /// Matches every record.
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn new(groups: Vec<WordGroup>, year: Option<String>) -> Self {
        let year = year.filter(|y| !y.trim().is_empty());
        Self { groups, year }
    }

    /// Total number of `field contains candidate` checks.
    pub fn check_count(&self) -> usize {
        self.groups.iter().map(|g| g.candidates.len() * 2).sum()
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.groups.iter().all(|g| g.matches(record))
            && self.year.as_deref().map_or(true, |y| record.year == y)
    }
}

/// Case folding shared by every store and the highlighter's expectations.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}
