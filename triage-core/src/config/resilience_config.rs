use serde::{Deserialize, Serialize};

use super::defaults;

/// Retry and circuit-breaker configuration applied to external calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Consecutive failures that open a breaker.
    pub failure_threshold: u32,
    /// Seconds an open breaker denies calls before allowing one probe.
    pub recovery_timeout_secs: u64,
    /// Per-call timeout; there is no master timeout across a run.
    pub call_timeout_secs: u64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            base_delay_ms: defaults::DEFAULT_BASE_DELAY_MS,
            max_delay_ms: defaults::DEFAULT_MAX_DELAY_MS,
            failure_threshold: defaults::DEFAULT_FAILURE_THRESHOLD,
            recovery_timeout_secs: defaults::DEFAULT_RECOVERY_TIMEOUT_SECS,
            call_timeout_secs: defaults::DEFAULT_CALL_TIMEOUT_SECS,
        }
    }
}
