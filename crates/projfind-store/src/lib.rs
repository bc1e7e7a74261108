//! projfind-store
//!
//! Corpus and settings stores: SQLite-backed (`sqlite`) for real deployments
//! and in-memory (`memory`) for tests and throwaway corpora. Both evaluate a
//! `MatchPredicate` with the same case folding.
pub mod schema;
pub mod sqlite;
pub mod memory;

pub use memory::{MemoryCorpusStore, MemorySettingsStore};
pub use sqlite::SqliteCorpusStore;
