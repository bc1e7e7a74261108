use std::collections::HashSet;

use projfind_core::types::ProjectRecord;

/// Drops repeated records, keeping the first occurrence.
///
/// Two records are the same when title, year and abstract are all equal.
pub fn dedupe(rows: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    let mut seen: HashSet<(String, String, String)> = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|r| seen.insert((r.title.clone(), r.year.clone(), r.abstract_text.clone())))
        .collect()
}
