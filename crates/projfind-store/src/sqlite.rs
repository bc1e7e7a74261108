use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info};

use projfind_core::error::{Error, Result};
use projfind_core::predicate::{fold_case, MatchPredicate};
use projfind_core::traits::{CorpusStore, SettingsStore};
use projfind_core::types::ProjectRecord;

use crate::schema::{create_tables, register_functions, FOLD_CASE_FN};

fn store_err(e: rusqlite::Error) -> Error { Error::StoreUnavailable(e.to_string()) }

pub struct SqliteCorpusStore {
	conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteCorpusStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SqliteCorpusStore").finish_non_exhaustive()
	}
}

impl SqliteCorpusStore {
	pub fn open(path: impl AsRef<Path>, default_banner: &str) -> Result<Self> {
		let conn = Connection::open(path.as_ref()).map_err(store_err)?;
		Self::from_connection(conn, default_banner)
	}

	pub fn open_in_memory(default_banner: &str) -> Result<Self> {
		let conn = Connection::open_in_memory().map_err(store_err)?;
		Self::from_connection(conn, default_banner)
	}

	fn from_connection(conn: Connection, default_banner: &str) -> Result<Self> {
		register_functions(&conn).map_err(store_err)?;
		create_tables(&conn, default_banner).map_err(store_err)?;
		Ok(Self { conn: Mutex::new(conn) })
	}

	fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
		self.conn.lock().map_err(|_| Error::StoreUnavailable("sqlite mutex poisoned".to_string()))
	}
}

/// Predicates binding more candidates than this are filtered in Rust after
/// a year-only query, keeping clear of SQLite's bound-variable limit.
pub const MAX_BOUND_PARAMS: usize = 16_000;

/// Translates a predicate into a `WHERE` clause and its bound parameters.
///
/// Candidates are folded here and bound, never spliced into the SQL text.
/// AND and OR chains are nested as balanced trees so the expression depth
/// grows with the log of the clause count.
pub fn compile_predicate(predicate: &MatchPredicate) -> (String, Vec<String>) {
	let mut clauses = Vec::with_capacity(predicate.groups.len());
	let mut params = Vec::with_capacity(predicate.check_count() + 1);
	for group in &predicate.groups {
		let candidates: Vec<&String> = group.candidates.iter().filter(|c| !c.is_empty()).collect();
		if candidates.is_empty() { clauses.push("(1=1)".to_string()); continue; }
		let subs: Vec<String> = candidates.iter().map(|c| {
			let folded = fold_case(c);
			params.push(folded.clone());
			params.push(folded);
			format!("(instr({f}(title), ?) > 0 OR instr({f}(abstract), ?) > 0)", f = FOLD_CASE_FN)
		}).collect();
		clauses.push(balanced(&subs, "OR"));
	}
	let mut where_clause = if clauses.is_empty() { "1=1".to_string() } else { balanced(&clauses, "AND") };
	if let Some(year) = &predicate.year {
		where_clause = format!("({}) AND year = ?", where_clause);
		params.push(year.clone());
	}
	(where_clause, params)
}

fn balanced(clauses: &[String], op: &str) -> String {
	match clauses {
		[] => "(1=1)".to_string(),
		[only] => only.clone(),
		_ => {
			let (left, right) = clauses.split_at(clauses.len() / 2);
			format!("({} {} {})", balanced(left, op), op, balanced(right, op))
		}
	}
}

impl SqliteCorpusStore {
	fn select(&self, predicate: &MatchPredicate) -> Result<Vec<ProjectRecord>> {
		let (where_clause, params) = compile_predicate(predicate);
		let sql = format!(
			"SELECT COALESCE(title, ''), COALESCE(year, ''), COALESCE(abstract, ''), COALESCE(supervisor, ''), COALESCE(student, '') \
			 FROM projects WHERE {} ORDER BY id",
			where_clause
		);
		debug!(groups = predicate.groups.len(), params = params.len(), "sqlite corpus query");
		let conn = self.lock()?;
		let mut stmt = conn.prepare(&sql).map_err(store_err)?;
		let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
			Ok(ProjectRecord {
				title: row.get(0)?,
				year: row.get(1)?,
				abstract_text: row.get(2)?,
				supervisor: row.get(3)?,
				student: row.get(4)?,
			})
		}).map_err(store_err)?;
		let mut out = Vec::new();
		for row in rows { out.push(row.map_err(store_err)?); }
		Ok(out)
	}
}

impl CorpusStore for SqliteCorpusStore {
	fn query(&self, predicate: &MatchPredicate) -> Result<Vec<ProjectRecord>> {
		if predicate.check_count() <= MAX_BOUND_PARAMS {
			return self.select(predicate);
		}
		debug!(checks = predicate.check_count(), "predicate too large for sql, filtering rows in process");
		let rows = self.select(&MatchPredicate::new(Vec::new(), predicate.year.clone()))?;
		Ok(rows.into_iter().filter(|r| predicate.matches(r)).collect())
	}

	fn years(&self) -> Result<Vec<String>> {
		let conn = self.lock()?;
		let mut stmt = conn
			.prepare("SELECT DISTINCT year FROM projects WHERE year IS NOT NULL ORDER BY year DESC")
			.map_err(store_err)?;
		let rows = stmt.query_map([], |row| row.get::<_, String>(0)).map_err(store_err)?;
		let mut out = Vec::new();
		for row in rows { out.push(row.map_err(store_err)?); }
		Ok(out)
	}

	fn count(&self) -> Result<usize> {
		let conn = self.lock()?;
		let total: i64 = conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0)).map_err(store_err)?;
		Ok(usize::try_from(total).unwrap_or(0))
	}

	fn insert(&self, records: &[ProjectRecord]) -> Result<usize> {
		let mut conn = self.lock()?;
		let tx = conn.transaction().map_err(store_err)?;
		{
			let mut stmt = tx
				.prepare("INSERT INTO projects (title, year, abstract, supervisor, student) VALUES (?1, ?2, ?3, ?4, ?5)")
				.map_err(store_err)?;
			for r in records {
				stmt.execute((&r.title, &r.year, &r.abstract_text, &r.supervisor, &r.student)).map_err(store_err)?;
			}
		}
		tx.commit().map_err(store_err)?;
		info!(records = records.len(), "inserted project records");
		Ok(records.len())
	}
}

impl SettingsStore for SqliteCorpusStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		let conn = self.lock()?;
		conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| row.get::<_, Option<String>>(0))
			.optional()
			.map(Option::flatten)
			.map_err(store_err)
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		let conn = self.lock()?;
		conn.execute(
			"INSERT INTO settings (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
			(key, value),
		).map_err(store_err)?;
		Ok(())
	}
}
