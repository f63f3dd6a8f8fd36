/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("embedding provider '{provider}' unavailable")]
    EmbeddingUnavailable { provider: String },

    #[error("telemetry store unreachable: {reason}")]
    StoreUnreachable { reason: String },
}
