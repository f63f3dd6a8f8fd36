//! # triage-confidence
//!
//! Deterministic, additive, evidence-only confidence scoring. No
//! unconditioned base score: every point is earned by a signal, and the
//! rule set is a table so it can be tested and extended without
//! touching control flow.

mod model;
mod next_steps;
mod rules;
mod signals;

pub use model::evaluate;
pub use signals::ConfidenceSignals;
