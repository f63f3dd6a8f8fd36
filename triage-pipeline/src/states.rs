//! Root-cause state classification: an ordered rule table evaluated
//! first-match, recomputed for every candidate once confidence is known.

use triage_core::models::{RootCauseCandidate, RootCauseState};

/// Evidence snapshot a candidate is classified against.
#[derive(Debug, Clone, Copy)]
pub struct StateInputs {
    pub findings_count: usize,
    pub correlation_score: f64,
    pub similar_incident: bool,
    pub confidence: f64,
}

struct StateRule {
    applies: fn(&StateInputs) -> bool,
    state: RootCauseState,
}

const STATE_RULES: &[StateRule] = &[
    StateRule {
        applies: |i| i.confidence >= 0.7 && i.similar_incident && i.correlation_score > 0.5,
        state: RootCauseState::Confirmed,
    },
    StateRule {
        applies: |i| i.correlation_score > 0.3 && i.findings_count >= 3,
        state: RootCauseState::Probable,
    },
    StateRule {
        applies: |i| i.findings_count >= 1,
        state: RootCauseState::Correlated,
    },
];

/// First matching rule wins; with no match the candidate is merely
/// Observed.
pub fn classify(inputs: &StateInputs) -> RootCauseState {
    STATE_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map(|rule| rule.state)
        .unwrap_or(RootCauseState::Observed)
}

/// The strongest state across all candidates, driving remediation
/// gating. Observed when there are no candidates.
pub fn best_state(candidates: &[RootCauseCandidate]) -> RootCauseState {
    candidates
        .iter()
        .map(|c| c.state)
        .max()
        .unwrap_or(RootCauseState::Observed)
}
