use figment::providers::{Format, Toml};
use figment::Figment;
use std::path::Path;

use projfind_core::config::{resolve_with_base, Config, LexiconSource};
use projfind_core::types::SearchMode;

#[test]
fn defaults_apply_without_any_file() {
    let config = Config::from_figment(Figment::new()).expect("config");
    let settings = config.settings().expect("settings");

    assert_eq!(settings.search.snippet_chars, 300);
    assert_eq!(settings.search.ellipsis, "...");
    assert_eq!(settings.search.default_mode, SearchMode::Smart);
    assert_eq!(settings.highlight.open_tag, "<mark>");
    assert_eq!(settings.lexicon.source, LexiconSource::Wordnet);
    assert_eq!(settings.settings.default_banner, "Data updated up to Sesi Jun 2025");
}

#[test]
fn toml_overrides_single_keys() {
    let toml = r#"
        [search]
        default_mode = "exact"
        snippet_chars = 120

        [lexicon]
        source = "none"
    "#;
    let config = Config::from_figment(Figment::new().merge(Toml::string(toml))).expect("config");
    let settings = config.settings().expect("settings");

    assert_eq!(settings.search.default_mode, SearchMode::Exact);
    assert_eq!(settings.search.snippet_chars, 120);
    assert_eq!(settings.search.ellipsis, "...");
    assert_eq!(settings.lexicon.source, LexiconSource::None);
    assert_eq!(config.get::<usize>("search.snippet_chars").expect("key"), 120);
}

#[test]
fn zero_snippet_length_is_rejected() {
    let toml = "[search]\nsnippet_chars = 0\n";
    assert!(Config::from_figment(Figment::new().merge(Toml::string(toml))).is_err());
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/srv/projfind");
    assert_eq!(resolve_with_base(base, "data/projfind.db"), base.join("data/projfind.db"));
    assert_eq!(resolve_with_base(base, "/var/db.sqlite"), Path::new("/var/db.sqlite"));
}
