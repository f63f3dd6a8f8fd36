use serde::{Deserialize, Serialize};

use super::defaults;

/// LLM provider configuration. With no base URL the provider chain is
/// empty and synthesis falls back to rule-based candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_secs: u64,
    pub root_cause_max_tokens: u32,
    pub remediation_max_tokens: u32,
}

impl LlmConfig {
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: String::new(),
            request_timeout_secs: defaults::DEFAULT_LLM_TIMEOUT_SECS,
            root_cause_max_tokens: defaults::DEFAULT_ROOT_CAUSE_MAX_TOKENS,
            remediation_max_tokens: defaults::DEFAULT_REMEDIATION_MAX_TOKENS,
        }
    }
}
