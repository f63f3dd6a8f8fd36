//! Circuit breaker: after `failure_threshold` consecutive failures the
//! circuit opens for `recovery_timeout`, then half-open admits exactly
//! one probing attempt.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug)]
struct BreakerInner {
    failures: u32,
    last_failure: Option<Instant>,
    state: BreakerState,
    /// True while the single half-open probe is outstanding.
    probe_in_flight: bool,
}

/// Per-resource circuit breaker. Named, shared process-wide through the
/// [`crate::BreakerRegistry`], independent of call site.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    failure_threshold: u32,
    recovery_timeout: Duration,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            failure_threshold,
            recovery_timeout,
            inner: Mutex::new(BreakerInner {
                failures: 0,
                last_failure: None,
                state: BreakerState::Closed,
                probe_in_flight: false,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state, applying the open → half-open transition once the
    /// recovery timeout has elapsed.
    pub fn state(&self) -> BreakerState {
        let mut inner = self.lock();
        self.refresh(&mut inner);
        inner.state
    }

    /// Whether a request may proceed right now. In half-open this
    /// consumes the single probe slot: concurrent callers get `false`
    /// until the probe resolves via `record_success`/`record_failure`.
    pub fn allow_request(&self) -> bool {
        let mut inner = self.lock();
        self.refresh(&mut inner);
        match inner.state {
            BreakerState::Closed => true,
            BreakerState::Open => false,
            BreakerState::HalfOpen => {
                if inner.probe_in_flight {
                    false
                } else {
                    inner.probe_in_flight = true;
                    true
                }
            }
        }
    }

    /// Resets the failure count and forces the breaker closed.
    pub fn record_success(&self) {
        let mut inner = self.lock();
        inner.failures = 0;
        inner.state = BreakerState::Closed;
        inner.probe_in_flight = false;
    }

    /// Counts a failure; opens the breaker once the count reaches the
    /// threshold.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        inner.failures += 1;
        inner.last_failure = Some(Instant::now());
        inner.probe_in_flight = false;
        if inner.failures >= self.failure_threshold {
            if inner.state != BreakerState::Open {
                warn!(
                    breaker = %self.name,
                    failures = inner.failures,
                    "circuit breaker open"
                );
            }
            inner.state = BreakerState::Open;
        }
    }

    fn refresh(&self, inner: &mut BreakerInner) {
        if inner.state == BreakerState::Open {
            let elapsed = inner
                .last_failure
                .map(|t| t.elapsed() >= self.recovery_timeout)
                .unwrap_or(true);
            if elapsed {
                inner.state = BreakerState::HalfOpen;
                inner.probe_in_flight = false;
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerInner> {
        // A poisoned breaker lock means a panic mid-update; the inner
        // state is still coherent (all fields are plain values).
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
