/// Retry and circuit-breaker errors.
#[derive(Debug, thiserror::Error)]
pub enum ResilienceError {
    #[error("circuit breaker '{breaker}' is open")]
    CircuitOpen { breaker: String },

    #[error("call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
