use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Results kept per evidence source after fusion.
    pub evidence_top_k: usize,
    /// Similar incidents kept per run.
    pub incident_top_k: usize,
    /// Base URL of the observability console, for evidence links.
    pub console_base_url: Option<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            evidence_top_k: defaults::DEFAULT_EVIDENCE_TOP_K,
            incident_top_k: defaults::DEFAULT_INCIDENT_TOP_K,
            console_base_url: None,
        }
    }
}
