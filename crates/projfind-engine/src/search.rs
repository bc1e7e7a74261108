use std::collections::BTreeSet;

use tracing::{debug, info};

use projfind_core::config::{Settings, SearchSettings, BANNER_KEY};
use projfind_core::error::Result;
use projfind_core::traits::{CorpusStore, LexicalDictionary, SettingsStore};
use projfind_core::types::{ProjectRecord, ResultRow, SearchMode, SearchPage, SearchRequest, SearchResult};
use projfind_lexicon::SynonymResolver;

use crate::dedupe::dedupe;
use crate::highlight::{truncate_chars, Highlighter};
use crate::query::QueryBuilder;

/// Runs exact and smart search for the same query and renders the rows of
/// the requested mode.
///
/// The engine holds presentation settings only; the store and the
/// dictionary are passed to every call.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    highlighter: Highlighter,
    options: SearchSettings,
}

impl Default for SearchEngine {
    fn default() -> Self { Self::new(Highlighter::default(), SearchSettings::default()) }
}

impl SearchEngine {
    pub fn new(highlighter: Highlighter, options: SearchSettings) -> Self { Self { highlighter, options } }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Highlighter::from_settings(&settings.highlight), settings.search.clone())
    }

    pub fn search(
        &self,
        store: &dyn CorpusStore,
        dictionary: &dyn LexicalDictionary,
        request: &SearchRequest,
    ) -> Result<SearchResult> {
        let words = request.words();
        if words.is_empty() {
            return Ok(SearchResult::default());
        }
        let year = request.year.as_deref();
        let mut resolver = SynonymResolver::new(dictionary);

        let exact_rows = dedupe(store.query(&QueryBuilder::exact(&words, year))?);
        let smart_rows = dedupe(store.query(&QueryBuilder::smart(&words, year, &mut resolver))?);
        let (exact_count, smart_count) = (exact_rows.len(), smart_rows.len());
        debug!(exact_count, smart_count, mode = %request.mode, "search counts");

        let (rows, keys) = match request.mode {
            SearchMode::Smart => (smart_rows, resolver.resolve_all(&words)),
            SearchMode::Exact => (exact_rows, words.iter().cloned().collect::<BTreeSet<String>>()),
        };
        let smart_terms = match request.mode {
            SearchMode::Smart => keys.iter().cloned().collect(),
            SearchMode::Exact => Vec::new(),
        };
        let rows = rows.iter().map(|r| self.render_row(r, &keys)).collect();

        Ok(SearchResult { exact_count, smart_count, rows, smart_terms, smart_degraded: resolver.is_degraded() })
    }

    /// `search` plus the years list and banner a results page shows, which
    /// are fetched even for an empty query.
    pub fn page(
        &self,
        store: &dyn CorpusStore,
        settings: &dyn SettingsStore,
        dictionary: &dyn LexicalDictionary,
        request: &SearchRequest,
    ) -> Result<SearchPage> {
        let years = store.years()?;
        let banner = settings.get(BANNER_KEY)?.unwrap_or_default();
        let result = self.search(store, dictionary, request)?;
        if !request.query.is_empty() {
            info!(query = %request.query, rows = result.rows.len(), degraded = result.smart_degraded, "search served");
        }
        Ok(SearchPage {
            query: request.query.clone(),
            selected_year: request.year.clone(),
            mode: request.mode,
            years,
            banner,
            result,
        })
    }

    fn render_row(&self, record: &ProjectRecord, keys: &BTreeSet<String>) -> ResultRow {
        let (head, truncated) = truncate_chars(&record.abstract_text, self.options.snippet_chars);
        let mut abstract_short = self.mark(head, keys);
        if truncated {
            abstract_short.push_str(&self.options.ellipsis);
        }
        ResultRow {
            title: self.mark(&record.title, keys),
            year: record.year.clone(),
            abstract_full: self.mark(&record.abstract_text, keys),
            abstract_short,
            supervisor: record.supervisor.clone(),
            student: record.student.clone(),
        }
    }

    fn mark(&self, text: &str, keys: &BTreeSet<String>) -> String {
        if self.options.escape_html {
            self.highlighter.highlight_html(text, keys)
        } else {
            self.highlighter.highlight(text, keys)
        }
    }
}
