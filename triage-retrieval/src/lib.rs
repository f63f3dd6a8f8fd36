//! # triage-retrieval
//!
//! Evidence gathering for the investigation pipeline: Reciprocal Rank
//! Fusion over lexical + vector search, the four evidence gatherers,
//! the similar-incident matcher, and console evidence links.

pub mod fusion;
pub mod gatherers;
pub mod hybrid;
pub mod incidents;
pub mod links;

pub use fusion::{fuse, FusedHit};
pub use gatherers::EvidenceGatherer;
pub use hybrid::HybridSearcher;
pub use incidents::IncidentMatcher;
pub use links::ConsoleLinks;
