//! Similar-incident matcher: pure vector nearest-neighbor search over
//! the resolved-incident knowledge base, post-filtered by scope.

use std::time::Duration;

use tracing::{debug, warn};

use triage_core::models::Incident;
use triage_core::traits::{IEmbeddingProvider, ITelemetryStore};
use triage_resilience::{retry, with_timeout, BreakerRegistry, RetryPolicy};

const BREAKER_NAME: &str = "incidents";

pub struct IncidentMatcher<'a> {
    store: &'a dyn ITelemetryStore,
    embedder: &'a dyn IEmbeddingProvider,
    breakers: &'a BreakerRegistry,
    policy: RetryPolicy,
    call_timeout: Duration,
}

impl<'a> IncidentMatcher<'a> {
    pub fn new(
        store: &'a dyn ITelemetryStore,
        embedder: &'a dyn IEmbeddingProvider,
        breakers: &'a BreakerRegistry,
        policy: RetryPolicy,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            embedder,
            breakers,
            policy,
            call_timeout,
        }
    }

    /// Top `top_k` similar incidents for the question, filtered by
    /// service/env when given.
    ///
    /// An unavailable embedding subsystem yields an empty list, not an
    /// error. A failing search yields an empty list plus the error
    /// string so the caller can report it.
    pub async fn find_similar(
        &self,
        question: &str,
        service: Option<&str>,
        env: Option<&str>,
        top_k: usize,
    ) -> (Vec<Incident>, Option<String>) {
        if !self.embedder.is_available() {
            debug!(
                provider = self.embedder.name(),
                "embedder unavailable, skipping incident search"
            );
            return (Vec::new(), None);
        }
        let embedding = match self.embedder.embed(question) {
            Ok(v) => v,
            Err(e) => {
                warn!(provider = self.embedder.name(), error = %e, "embedding failed, skipping incident search");
                return (Vec::new(), None);
            }
        };

        let breaker = self.breakers.get(BREAKER_NAME);
        let outcome = retry(&self.policy, Some(&breaker), BREAKER_NAME, || {
            with_timeout(
                self.call_timeout,
                self.store.incident_search(&embedding, top_k * 2),
            )
        })
        .await;

        match outcome {
            Ok(candidates) => {
                let incidents: Vec<Incident> = candidates
                    .into_iter()
                    .filter(|inc| {
                        service
                            .map(|s| inc.service.as_deref() == Some(s))
                            .unwrap_or(true)
                            && env.map(|e| inc.env.as_deref() == Some(e)).unwrap_or(true)
                    })
                    .take(top_k)
                    .collect();
                debug!(count = incidents.len(), "incident search complete");
                (incidents, None)
            }
            Err(e) => {
                warn!(error = %e, "incident search failed");
                (Vec::new(), Some(e.to_string()))
            }
        }
    }
}
