//! projfind-engine
//!
//! Search & highlight: builds exact and synonym-expanded predicates for the
//! same query, runs both against a corpus store, deduplicates, and marks
//! matched terms in titles and abstracts.
pub mod dedupe;
pub mod highlight;
pub mod query;
pub mod search;

pub use dedupe::dedupe;
pub use highlight::Highlighter;
pub use query::QueryBuilder;
pub use search::SearchEngine;
