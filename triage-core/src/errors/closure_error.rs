/// Closure-memory storage errors.
#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    #[error("closure store failed: {reason}")]
    StorageFailed { reason: String },
}
