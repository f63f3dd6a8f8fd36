//! Tracing bootstrap and span names for the investigation pipeline.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Span names as constants for programmatic use.
pub mod spans {
    pub const PIPELINE: &str = "triage.pipeline";
    pub const GATHER: &str = "triage.gather";
    pub const RETRIEVAL: &str = "triage.retrieval";
    pub const INCIDENTS: &str = "triage.incidents";
    pub const SYNTHESIS: &str = "triage.synthesis";
    pub const CLOSURE: &str = "triage.closure";
}
