//! Shared wiring for the `projfind` binaries: logging, store opening,
//! argument parsing and plain-text page rendering.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use projfind_core::config::{resolve_with_base, Settings};
use projfind_core::types::{SearchMode, SearchPage};
use projfind_store::SqliteCorpusStore;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

pub fn open_store(settings: &Settings, base: &Path) -> Result<SqliteCorpusStore> {
    let db_path = resolve_with_base(base, &settings.data.db_path);
    tracing::debug!(db = %db_path.display(), "opening corpus store");
    Ok(SqliteCorpusStore::open(&db_path, &settings.settings.default_banner)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    pub query: String,
    pub year: Option<String>,
    pub mode: SearchMode,
    pub json: bool,
}

/// Parses `<query words…> [--year Y] [--mode exact|smart] [--json]`.
pub fn parse_search_args(args: &[String], default_mode: SearchMode) -> Result<SearchArgs> {
    let mut words = Vec::new();
    let mut year = None;
    let mut mode = default_mode;
    let mut json = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--year" => year = Some(iter.next().ok_or_else(|| anyhow!("--year needs a value"))?.clone()),
            "--mode" => mode = iter.next().ok_or_else(|| anyhow!("--mode needs a value"))?.parse()?,
            "--json" => json = true,
            _ => words.push(arg.clone()),
        }
    }
    Ok(SearchArgs { query: words.join(" "), year, mode, json })
}

pub fn render_page(page: &SearchPage) -> String {
    let mut out = String::new();
    if !page.banner.is_empty() {
        let _ = writeln!(out, "📢 {}", page.banner);
    }
    let _ = writeln!(out, "Years: {}", if page.years.is_empty() { "-".to_string() } else { page.years.join(", ") });
    if page.query.is_empty() {
        return out;
    }
    let result = &page.result;
    let _ = writeln!(out, "🔍 \"{}\" ({} mode): {} exact / {} smart", page.query, page.mode, result.exact_count, result.smart_count);
    if result.smart_degraded {
        let _ = writeln!(out, "⚠️  Smart search degraded: synonym dictionary unavailable");
    }
    if !result.smart_terms.is_empty() {
        let _ = writeln!(out, "Terms: {}", result.smart_terms.join(", "));
    }
    for (i, row) in result.rows.iter().enumerate() {
        let _ = writeln!(out, "\n  {}. {} ({})", i + 1, row.title, row.year);
        let _ = writeln!(out, "     Supervisor: {}  Student: {}", row.supervisor, row.student);
        let _ = writeln!(out, "     {}", row.abstract_short);
    }
    out
}
