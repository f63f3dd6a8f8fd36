use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{TIER_HIGH_THRESHOLD, TIER_MEDIUM_THRESHOLD};

/// Coarse confidence bucket driving next-step guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Tier is a pure function of the score: ≥0.55 high, ≥0.25 medium,
    /// else low.
    pub fn from_score(score: f64) -> Self {
        if score >= TIER_HIGH_THRESHOLD {
            ConfidenceTier::High
        } else if score >= TIER_MEDIUM_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

/// Evidence-weighted confidence for one investigation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// Scalar in [0, 0.95].
    pub score: f64,
    /// Human-readable reasons, in evaluation order.
    pub reasons: Vec<String>,
    pub tier: ConfidenceTier,
    /// At most 3 actionable suggestions.
    pub next_steps: Vec<String>,
    /// Signal name → signed contribution to the score.
    pub contributions: BTreeMap<String, f64>,
}

impl ConfidenceResult {
    /// Zero-confidence result used for degraded runs, carrying the
    /// diagnostic reasons.
    pub fn zero(reasons: Vec<String>) -> Self {
        Self {
            score: 0.0,
            reasons,
            tier: ConfidenceTier::Low,
            next_steps: Vec::new(),
            contributions: BTreeMap::new(),
        }
    }
}
