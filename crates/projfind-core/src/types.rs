//! Domain types shared by the stores, the lexicon and the search engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One academic project as ingested into the corpus.
///
/// Records carry no surrogate key; identity for deduplication is
/// `(title, year, abstract_text)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub year: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub supervisor: String,
    pub student: String,
}

/// Which candidate set each query word is matched with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The word itself, verbatim substring.
    Exact,
    /// The word expanded to its synonym set.
    #[default]
    Smart,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::Smart => "smart",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(SearchMode::Exact),
            "smart" => Ok(SearchMode::Smart),
            other => Err(Error::InvalidConfig(format!(
                "unknown search mode '{other}' (expected 'exact' or 'smart')"
            ))),
        }
    }
}

/// A raw search as the caller submitted it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub year: Option<String>,
    pub mode: SearchMode,
}

impl SearchRequest {
    /// Builds a request, treating a blank year as "no year filter".
    pub fn new(query: impl Into<String>, year: Option<&str>, mode: SearchMode) -> Self {
        let year = year.map(str::trim).filter(|y| !y.is_empty()).map(ToString::to_string);
        Self { query: query.into().trim().to_string(), year, mode }
    }

    /// Splits the query on whitespace, discarding empty tokens.
    pub fn words(&self) -> Vec<String> {
        self.query.split_whitespace().map(ToString::to_string).collect()
    }
}

/// A synonym set as returned by a lexical dictionary.
///
/// Lemmas are kept as the dictionary spells them (WordNet uses `_` between
/// the words of a multi-word lemma).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub lemmas: Vec<String>,
}

impl Synset {
    pub fn new<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { lemmas: lemmas.into_iter().map(Into::into).collect() }
    }
}

/// A matched record prepared for display.
///
/// `title`, `abstract_full` and `abstract_short` carry highlight markers and
/// are safe to render as-is; the remaining fields are plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub title: String,
    pub year: String,
    pub abstract_full: String,
    pub abstract_short: String,
    pub supervisor: String,
    pub student: String,
}

/// Outcome of one search: both counts, the rows of the active mode and the
/// expanded terms when the active mode is smart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub exact_count: usize,
    pub smart_count: usize,
    pub rows: Vec<ResultRow>,
    pub smart_terms: Vec<String>,
    /// Set when at least one synonym lookup failed and fell back to the word itself.
    pub smart_degraded: bool,
}

/// Everything a results page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub query: String,
    pub selected_year: Option<String>,
    pub mode: SearchMode,
    pub years: Vec<String>,
    pub banner: String,
    pub result: SearchResult,
}
