//! # triage-closure
//!
//! Closure memory: a bounded in-process store of past resolutions plus
//! a fuzzy matcher that biases confidence and injects historical root
//! causes into new investigations.

pub mod keywords;
pub mod matcher;
pub mod memory;
pub mod sqlite;

pub use keywords::extract_keywords;
pub use matcher::{best_match, ClosureMatch};
pub use memory::ClosureMemory;
pub use sqlite::SqliteClosureStore;
