use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use projfind_core::error::{Error, Result};
use projfind_core::predicate::MatchPredicate;
use projfind_core::traits::{CorpusStore, SettingsStore};
use projfind_core::types::ProjectRecord;

/// Corpus held in insertion order; queries scan it front to back.
#[derive(Debug, Default)]
pub struct MemoryCorpusStore {
	records: RwLock<Vec<ProjectRecord>>,
}

impl MemoryCorpusStore {
	pub fn new() -> Self { Self::default() }

	pub fn with_records(records: Vec<ProjectRecord>) -> Self {
		Self { records: RwLock::new(records) }
	}

	fn read(&self) -> Result<RwLockReadGuard<'_, Vec<ProjectRecord>>> {
		self.records.read().map_err(|_| Error::StoreUnavailable("memory store lock poisoned".to_string()))
	}

	fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<ProjectRecord>>> {
		self.records.write().map_err(|_| Error::StoreUnavailable("memory store lock poisoned".to_string()))
	}
}

impl CorpusStore for MemoryCorpusStore {
	fn query(&self, predicate: &MatchPredicate) -> Result<Vec<ProjectRecord>> {
		Ok(self.read()?.iter().filter(|r| predicate.matches(r)).cloned().collect())
	}

	fn years(&self) -> Result<Vec<String>> {
		let years: BTreeSet<String> = self.read()?.iter().map(|r| r.year.clone()).collect();
		Ok(years.into_iter().rev().collect())
	}

	fn count(&self) -> Result<usize> { Ok(self.read()?.len()) }

	fn insert(&self, records: &[ProjectRecord]) -> Result<usize> {
		self.write()?.extend_from_slice(records);
		Ok(records.len())
	}
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
	values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
	pub fn new() -> Self { Self::default() }

	pub fn with_value(key: &str, value: &str) -> Self {
		let store = Self::default();
		if let Ok(mut values) = store.values.write() { values.insert(key.to_string(), value.to_string()); }
		store
	}
}

impl SettingsStore for MemorySettingsStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		let values = self.values.read().map_err(|_| Error::StoreUnavailable("settings lock poisoned".to_string()))?;
		Ok(values.get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		let mut values = self.values.write().map_err(|_| Error::StoreUnavailable("settings lock poisoned".to_string()))?;
		values.insert(key.to_string(), value.to_string());
		Ok(())
	}
}
