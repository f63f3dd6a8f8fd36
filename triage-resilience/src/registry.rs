//! Named breaker registry, one breaker per external resource.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use triage_core::config::ResilienceConfig;

use crate::breaker::{BreakerState, CircuitBreaker};

/// Process-wide registry of named circuit breakers. Owned by the
/// orchestrator and injected where needed; two call sites asking for the
/// same name share one breaker.
pub struct BreakerRegistry {
    failure_threshold: u32,
    recovery_timeout: Duration,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    pub fn new(failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            failure_threshold,
            recovery_timeout,
            breakers: DashMap::new(),
        }
    }

    pub fn from_config(config: &ResilienceConfig) -> Self {
        Self::new(
            config.failure_threshold,
            Duration::from_secs(config.recovery_timeout_secs),
        )
    }

    /// Get the breaker for `name`, creating it with the registry
    /// defaults on first use.
    pub fn get(&self, name: &str) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(CircuitBreaker::new(
                    name,
                    self.failure_threshold,
                    self.recovery_timeout,
                ))
            })
            .clone()
    }

    /// Snapshot of breaker states for health reporting.
    pub fn states(&self) -> Vec<(String, BreakerState)> {
        self.breakers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().state()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }
}
