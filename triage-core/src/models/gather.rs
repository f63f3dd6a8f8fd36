use serde::{Deserialize, Serialize};

use super::evidence::EvidenceItem;

/// Outcome of a single evidence gatherer for one run.
///
/// A failed gather still produces a result: empty evidence plus the error
/// string. Gather failures never abort the investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherResult {
    pub summary: String,
    pub evidence: Vec<EvidenceItem>,
    /// The query that was issued, kept for audit.
    pub raw_query: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl GatherResult {
    pub fn ok(
        summary: impl Into<String>,
        evidence: Vec<EvidenceItem>,
        raw_query: Option<serde_json::Value>,
    ) -> Self {
        Self {
            summary: summary.into(),
            evidence,
            raw_query,
            error: None,
        }
    }

    pub fn failed(
        summary: impl Into<String>,
        raw_query: Option<serde_json::Value>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            evidence: Vec::new(),
            raw_query,
            error: Some(error.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty()
    }
}
