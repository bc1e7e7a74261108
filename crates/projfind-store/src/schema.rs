use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use projfind_core::predicate::fold_case;

pub const FOLD_CASE_FN: &str = "fold_case";

pub fn create_tables(conn: &Connection, default_banner: &str) -> rusqlite::Result<()> {
	conn.execute_batch(
		r"
		CREATE TABLE IF NOT EXISTS projects (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			title TEXT,
			year TEXT,
			abstract TEXT,
			supervisor TEXT,
			student TEXT
		);
		CREATE INDEX IF NOT EXISTS idx_projects_year ON projects(year);
		CREATE TABLE IF NOT EXISTS settings (
			key TEXT PRIMARY KEY,
			value TEXT
		);
		",
	)?;
	conn.execute(
		"INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
		(projfind_core::config::BANNER_KEY, default_banner),
	)?;
	Ok(())
}

/// Registers `fold_case(text)`, the Unicode lowercasing used for containment
/// tests. SQLite's built-in `lower()` only folds ASCII.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
	conn.create_scalar_function(
		FOLD_CASE_FN,
		1,
		FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
		|ctx| {
			let value: Option<String> = ctx.get(0)?;
			Ok(value.map(|v| fold_case(&v)))
		},
	)
}
