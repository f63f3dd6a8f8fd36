//! Error types, one enum per subsystem, aggregated into [`TriageError`].

mod closure_error;
mod llm_error;
mod pipeline_error;
mod resilience_error;
mod retrieval_error;

pub use closure_error::ClosureError;
pub use llm_error::LlmError;
pub use pipeline_error::PipelineError;
pub use resilience_error::ResilienceError;
pub use retrieval_error::RetrievalError;

/// Unified error type for the triage workspace.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error(transparent)]
    Resilience(#[from] ResilienceError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Closure(#[from] ClosureError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Workspace-wide result alias.
pub type TriageResult<T> = Result<T, TriageError>;
