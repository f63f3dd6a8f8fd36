//! # triage-pipeline
//!
//! The gated investigation orchestrator. Sequences evidence gathering,
//! correlation, similar-incident search, root-cause synthesis, state
//! classification, remediation gating, closure matching, and confidence
//! into one synchronous pipeline per request, with a streaming variant
//! that publishes typed progress events from a background worker.

mod attempts;
mod engine;
mod states;
mod streaming;
mod synthesis;
mod validators;

pub use attempts::{scope_fingerprint, AttemptOutcome, AttemptTracker};
pub use engine::{ClosureAck, InvestigationEngine};
pub use states::{best_state, classify, StateInputs};
pub use streaming::{spawn_streaming, CancelToken, InvestigationStream};
