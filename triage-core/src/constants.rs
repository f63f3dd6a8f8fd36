//! Workspace-wide constants. Tuning knobs that are part of the scoring
//! contract live here; per-subsystem defaults live in `config::defaults`.

/// Confidence never exceeds this, no matter how many signals fire.
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Confidence at or above this is the high tier.
pub const TIER_HIGH_THRESHOLD: f64 = 0.55;

/// Confidence at or above this (and below high) is the medium tier.
pub const TIER_MEDIUM_THRESHOLD: f64 = 0.25;

/// Penalty per missing declared evidence source.
pub const MISSING_SOURCE_PENALTY: f64 = 0.05;

/// Total missing-source penalty is capped here regardless of source count.
pub const MISSING_PENALTY_CAP: f64 = 0.20;

/// Next-step suggestion lists are truncated to this length.
pub const MAX_NEXT_STEPS: usize = 3;

/// Closure matches at or above this score inject their root cause
/// as a candidate and feed the confidence bonus.
pub const CLOSURE_INJECTION_THRESHOLD: f64 = 0.4;

/// Minimum evidence items (findings + incidents) before a concrete
/// remediation may be proposed.
pub const MIN_EVIDENCE_FOR_FIX: usize = 2;

/// Candidate text used when no hypothesis could be produced.
pub const INSUFFICIENT_EVIDENCE_SENTINEL: &str = "Insufficient evidence – gather more signals";

/// Provenance prefix for candidates injected from closure memory.
pub const PAST_RESOLUTION_PREFIX: &str = "[Past resolution]";
