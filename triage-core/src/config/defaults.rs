//! Default values for every config knob.

pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_EVIDENCE_TOP_K: usize = 20;
pub const DEFAULT_INCIDENT_TOP_K: usize = 5;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5_000;
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;
pub const DEFAULT_RECOVERY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_CLOSURE_CAPACITY: usize = 100;

pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ROOT_CAUSE_MAX_TOKENS: u32 = 300;
pub const DEFAULT_REMEDIATION_MAX_TOKENS: u32 = 800;
