//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_SEARCH__SNIPPET_CHARS`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::SearchMode;

pub const BANNER_KEY: &str = "session_text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub db_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { db_path: "projfind.db".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_mode: SearchMode,
    pub snippet_chars: usize,
    pub ellipsis: String,
    pub escape_html: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { default_mode: SearchMode::Smart, snippet_chars: 300, ellipsis: "...".to_string(), escape_html: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    pub open_tag: String,
    pub close_tag: String,
    pub max_keywords: usize,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self { open_tag: "<mark>".to_string(), close_tag: "</mark>".to_string(), max_keywords: 512 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexiconSource {
    #[default]
    Wordnet,
    Http,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconSettings {
    pub source: LexiconSource,
    pub wordnet_path: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub max_results: usize,
}

impl Default for LexiconSettings {
    fn default() -> Self {
        Self {
            source: LexiconSource::Wordnet,
            wordnet_path: "wordnet".to_string(),
            endpoint: "https://api.datamuse.com".to_string(),
            timeout_ms: 2000,
            max_results: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerSettings {
    pub default_banner: String,
}

impl Default for BannerSettings {
    fn default() -> Self {
        Self { default_banner: "Data updated up to Sesi Jun 2025".to_string() }
    }
}

/// All typed sections, each falling back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub highlight: HighlightSettings,
    pub lexicon: LexiconSettings,
    pub settings: BannerSettings,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Wraps an already-assembled figment (defaults are merged underneath).
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment: Figment::from(Serialized::defaults(Settings::default())).merge(figment) };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        if settings.search.snippet_chars == 0 {
            return Err(Error::InvalidConfig("search.snippet_chars must be greater than 0".to_string()));
        }
        if settings.highlight.max_keywords == 0 {
            return Err(Error::InvalidConfig("highlight.max_keywords must be greater than 0".to_string()));
        }
        if settings.highlight.open_tag.is_empty() || settings.highlight.close_tag.is_empty() {
            return Err(Error::InvalidConfig("highlight tags must not be empty".to_string()));
        }
        if settings.lexicon.timeout_ms == 0 {
            return Err(Error::InvalidConfig("lexicon.timeout_ms must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
