use serde::{Deserialize, Serialize};

/// Lifecycle stage of a root-cause hypothesis, ordered by how strongly
/// the evidence supports it. The `Ord` impl drives remediation gating:
/// the best state across all candidates decides what may be proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootCauseState {
    Observed,
    Correlated,
    Probable,
    Confirmed,
}

impl RootCauseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootCauseState::Observed => "observed",
            RootCauseState::Correlated => "correlated",
            RootCauseState::Probable => "probable",
            RootCauseState::Confirmed => "confirmed",
        }
    }
}

/// A hypothesis plus its current lifecycle state. Recomputed every run,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseCandidate {
    pub text: String,
    pub state: RootCauseState,
}
