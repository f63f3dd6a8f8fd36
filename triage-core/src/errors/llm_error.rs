/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("no LLM provider configured")]
    NotConfigured,

    #[error("provider '{provider}' request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("provider '{provider}' returned an empty response")]
    EmptyResponse { provider: String },
}
