//! Retry with deterministic exponential backoff. Delay for attempt `i`
//! (0-indexed) is `min(base_delay * 2^i, max_delay)`, no jitter.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use triage_core::config::ResilienceConfig;
use triage_core::errors::{PipelineError, ResilienceError, TriageError, TriageResult};

use crate::breaker::CircuitBreaker;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    pub fn from_config(config: &ResilienceConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// `min(base_delay * 2^attempt, max_delay)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` up to `max_retries` times with backoff between attempts.
///
/// When a breaker is given it gates every attempt: an open circuit
/// fails fast with [`ResilienceError::CircuitOpen`] without invoking
/// the operation, and every attempt outcome is recorded on it. On
/// exhaustion the last error propagates.
pub async fn retry<T, F, Fut>(
    policy: &RetryPolicy,
    breaker: Option<&CircuitBreaker>,
    label: &str,
    mut op: F,
) -> TriageResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TriageResult<T>>,
{
    let mut last_err: Option<TriageError> = None;

    for attempt in 0..policy.max_retries {
        if let Some(b) = breaker {
            if !b.allow_request() {
                warn!(breaker = b.name(), label, "circuit open, failing fast");
                return Err(ResilienceError::CircuitOpen {
                    breaker: b.name().to_string(),
                }
                .into());
            }
        }

        match op().await {
            Ok(value) => {
                if let Some(b) = breaker {
                    b.record_success();
                }
                return Ok(value);
            }
            Err(e) => {
                if let Some(b) = breaker {
                    b.record_failure();
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    label,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "attempt failed"
                );
                last_err = Some(e);
                if attempt + 1 < policy.max_retries {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    error!(label, max_retries = policy.max_retries, "retries exhausted");
    Err(last_err.unwrap_or_else(|| {
        PipelineError::Internal {
            reason: format!("retry of '{label}' ran zero attempts"),
        }
        .into()
    }))
}

/// Like [`retry`], but on exhaustion (or an open circuit) returns
/// `fallback()` instead of an error.
pub async fn retry_or<T, F, Fut, FB>(
    policy: &RetryPolicy,
    breaker: Option<&CircuitBreaker>,
    label: &str,
    op: F,
    fallback: FB,
) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TriageResult<T>>,
    FB: FnOnce() -> T,
{
    match retry(policy, breaker, label, op).await {
        Ok(value) => value,
        Err(e) => {
            info!(label, error = %e, "using fallback");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use triage_core::errors::RetrievalError;

    use super::*;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1), Duration::from_millis(4))
    }

    fn search_failed() -> TriageError {
        RetrievalError::SearchFailed {
            reason: "boom".into(),
        }
        .into()
    }

    #[test]
    fn delay_is_capped_exponential() {
        let policy = RetryPolicy::new(
            5,
            Duration::from_millis(500),
            Duration::from_millis(5_000),
        );
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4_000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(5_000));
        assert_eq!(policy.delay_for(10), Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry(&fast_policy(3), None, "flaky", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(search_failed())
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhaustion_returns_last_error() {
        let result: TriageResult<()> =
            retry(&fast_policy(2), None, "down", || async { Err(search_failed()) }).await;
        assert!(matches!(
            result,
            Err(TriageError::Retrieval(RetrievalError::SearchFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn fallback_covers_exhaustion() {
        let value = retry_or(
            &fast_policy(2),
            None,
            "down",
            || async { Err::<u32, _>(search_failed()) },
            || 7,
        )
        .await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn open_breaker_skips_operation() {
        let breaker = CircuitBreaker::new("dep", 1, Duration::from_secs(60));
        breaker.record_failure();
        let calls = AtomicU32::new(0);
        let result: TriageResult<()> = retry(&fast_policy(3), Some(&breaker), "dep", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert!(matches!(
            result,
            Err(TriageError::Resilience(ResilienceError::CircuitOpen { .. }))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
