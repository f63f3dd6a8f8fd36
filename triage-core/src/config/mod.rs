//! Configuration for every subsystem, with serde defaults and TOML
//! loading. Each section can be omitted from the file.

pub mod defaults;

mod closure_config;
mod llm_config;
mod resilience_config;
mod retrieval_config;

use serde::{Deserialize, Serialize};

pub use closure_config::ClosureConfig;
pub use llm_config::LlmConfig;
pub use resilience_config::ResilienceConfig;
pub use retrieval_config::RetrievalConfig;

/// Top-level configuration for the triage workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub retrieval: RetrievalConfig,
    pub resilience: ResilienceConfig,
    pub closure: ClosureConfig,
    pub llm: LlmConfig,
}

impl TriageConfig {
    /// Parse from TOML text. Missing sections and fields fall back to
    /// defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg = TriageConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.retrieval.rrf_k, defaults::DEFAULT_RRF_K);
        assert_eq!(cfg.closure.capacity, defaults::DEFAULT_CLOSURE_CAPACITY);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = TriageConfig::from_toml_str("[retrieval]\nevidence_top_k = 50\n").unwrap();
        assert_eq!(cfg.retrieval.evidence_top_k, 50);
        assert_eq!(cfg.retrieval.rrf_k, defaults::DEFAULT_RRF_K);
    }
}
