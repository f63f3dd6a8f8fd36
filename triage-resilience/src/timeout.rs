//! Per-call timeout wrapper. Every external call carries its own
//! timeout; there is no master timeout across a pipeline run.

use std::future::Future;
use std::time::Duration;

use triage_core::errors::{ResilienceError, TriageResult};

/// Await `fut` for at most `limit`, mapping elapsed time to
/// [`ResilienceError::Timeout`].
pub async fn with_timeout<T, Fut>(limit: Duration, fut: Fut) -> TriageResult<T>
where
    Fut: Future<Output = TriageResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ResilienceError::Timeout {
            seconds: limit.as_secs(),
        }
        .into()),
    }
}
