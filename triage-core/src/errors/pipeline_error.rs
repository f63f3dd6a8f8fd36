/// Orchestrator errors. Almost everything degrades inside the pipeline;
/// these are the few conditions that surface to the caller.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("investigation cancelled")]
    Cancelled,

    #[error("internal pipeline fault: {reason}")]
    Internal { reason: String },
}
