//! # triage-core
//!
//! Foundation crate for the triage investigation pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TriageConfig;
pub use errors::{TriageError, TriageResult};
pub use models::{
    ConfidenceResult, ConfidenceTier, EvidenceFilter, EvidenceItem, GatherResult, Incident,
    InvestigationReport, PipelineArtifacts, RootCauseCandidate, RootCauseState, Scope, SourceKind,
    TimeRange,
};
