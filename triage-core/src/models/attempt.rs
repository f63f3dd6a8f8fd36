use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded attempt at a logical investigation scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Stable hash of the normalized question + service + env.
    pub fingerprint: String,
    /// 1-based sequential attempt number within the scope.
    pub attempt: u32,
    pub confidence: f64,
    pub missing_signals: Vec<String>,
    /// Per-source evidence counts at the time of the attempt.
    pub signals: BTreeMap<String, usize>,
    pub recorded_at: DateTime<Utc>,
}

/// Semantic difference versus the immediately preceding attempt for the
/// same scope fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDelta {
    /// Total evidence count change (may be negative).
    pub signals_added: i64,
    pub confidence_delta: f64,
    /// Signals that were missing last run and are present now.
    pub missing_resolved: Vec<String>,
    pub root_cause_changed: bool,
}
