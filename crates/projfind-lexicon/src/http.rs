use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use projfind_core::config::LexiconSettings;
use projfind_core::error::{Error, Result};
use projfind_core::traits::LexicalDictionary;
use projfind_core::types::Synset;

/// Thesaurus reached over HTTP with a Datamuse-compatible API
/// (`GET /words?rel_syn=<word>&max=<n>`). The whole answer is one synset.
#[derive(Clone)]
pub struct HttpThesaurus {
    endpoint: String,
    max_results: usize,
    http: Client,
}

impl std::fmt::Debug for HttpThesaurus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpThesaurus")
            .field("endpoint", &self.endpoint)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct WordEntry {
    word: String,
}

fn unavailable(e: reqwest::Error) -> Error { Error::DictionaryUnavailable(e.to_string()) }

impl HttpThesaurus {
    pub fn new(settings: &LexiconSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(unavailable)?;
        Ok(Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            max_results: settings.max_results,
            http,
        })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }
}

/// Parses a Datamuse word list into a single synset.
pub fn parse_word_list(body: &str) -> Result<Synset> {
    let entries: Vec<WordEntry> = serde_json::from_str(body)
        .map_err(|e| Error::DictionaryUnavailable(format!("unexpected thesaurus response: {e}")))?;
    Ok(Synset::new(entries.into_iter().map(|e| e.word).filter(|w| !w.trim().is_empty())))
}

impl LexicalDictionary for HttpThesaurus {
    fn synsets_of(&self, word: &str) -> Result<Vec<Synset>> {
        let url = format!("{}/words", self.endpoint);
        let max = self.max_results.to_string();
        let resp = self
            .http
            .get(url)
            .query(&[("rel_syn", word), ("max", max.as_str())])
            .send()
            .map_err(unavailable)?;
        if !resp.status().is_success() {
            return Err(Error::DictionaryUnavailable(format!("thesaurus returned status {}", resp.status())));
        }
        let body = resp.text().map_err(unavailable)?;
        let synset = parse_word_list(&body)?;
        debug!(word, lemmas = synset.lemmas.len(), "thesaurus lookup");
        if synset.lemmas.is_empty() { Ok(vec![]) } else { Ok(vec![synset]) }
    }
}
