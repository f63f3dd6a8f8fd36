//! The four evidence gatherers. Each runs under retry + its own named
//! circuit breaker and per-call timeout; a failure produces a
//! `GatherResult` carrying the error instead of aborting the run.

use std::time::Duration;

use serde_json::json;
use tracing::error;

use triage_core::models::{EvidenceFilter, EvidenceItem, GatherResult, RawHit, SourceKind};
use triage_core::traits::{IEmbeddingProvider, ITelemetryStore};
use triage_resilience::{retry, with_timeout, BreakerRegistry, RetryPolicy};

use crate::hybrid::HybridSearcher;
use crate::links::ConsoleLinks;

/// Breaker name for a source kind, one per external resource.
fn breaker_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Log => "evidence-logs",
        SourceKind::Trace => "evidence-traces",
        SourceKind::Metric => "evidence-metrics",
        SourceKind::Change => "evidence-changes",
    }
}

pub struct EvidenceGatherer<'a> {
    store: &'a dyn ITelemetryStore,
    embedder: &'a dyn IEmbeddingProvider,
    breakers: &'a BreakerRegistry,
    links: &'a ConsoleLinks,
    policy: RetryPolicy,
    call_timeout: Duration,
    rrf_k: u32,
}

impl<'a> EvidenceGatherer<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: &'a dyn ITelemetryStore,
        embedder: &'a dyn IEmbeddingProvider,
        breakers: &'a BreakerRegistry,
        links: &'a ConsoleLinks,
        policy: RetryPolicy,
        call_timeout: Duration,
        rrf_k: u32,
    ) -> Self {
        Self {
            store,
            embedder,
            breakers,
            links,
            policy,
            call_timeout,
            rrf_k,
        }
    }

    /// Hybrid-search one source (logs, traces, or metrics).
    pub async fn gather(
        &self,
        kind: SourceKind,
        question: &str,
        filter: &EvidenceFilter,
    ) -> GatherResult {
        let name = breaker_name(kind);
        let breaker = self.breakers.get(name);
        let searcher = HybridSearcher::new(self.store, self.embedder, self.rrf_k);
        let top_k = filter.top_k;
        let payload = json!({
            "question": truncate(question, 100),
            "source": kind.key(),
            "top_k": top_k,
        });

        let outcome = retry(&self.policy, Some(&breaker), name, || {
            with_timeout(
                self.call_timeout,
                searcher.search(question, filter, kind, top_k),
            )
        })
        .await;

        match outcome {
            Ok(hits) => {
                let evidence: Vec<EvidenceItem> = hits
                    .iter()
                    .map(|fused| self.to_evidence(&fused.hit, kind, filter))
                    .collect();
                GatherResult::ok(
                    format!("Found {} {} hits (hybrid search).", evidence.len(), kind.key()),
                    evidence,
                    Some(payload),
                )
            }
            Err(e) => {
                error!(source = kind.key(), error = %e, "gather failed");
                GatherResult::failed(
                    format!("{} search failed", kind.key()),
                    Some(payload),
                    e.to_string(),
                )
            }
        }
    }

    /// Plain time+service filtered query over change events, with a
    /// substring heuristic for deploy/release activity.
    pub async fn gather_changes(&self, filter: &EvidenceFilter) -> GatherResult {
        let name = breaker_name(SourceKind::Change);
        let breaker = self.breakers.get(name);
        let payload = json!({
            "source": "changes",
            "service": filter.service,
        });

        let outcome = retry(&self.policy, Some(&breaker), name, || {
            with_timeout(self.call_timeout, self.store.change_events(filter))
        })
        .await;

        match outcome {
            Ok(hits) => {
                let total = hits.len();
                let deploy_like: Vec<&RawHit> = hits
                    .iter()
                    .filter(|h| {
                        h.message
                            .as_deref()
                            .map(|m| {
                                let lower = m.to_lowercase();
                                lower.contains("deploy") || lower.contains("release")
                            })
                            .unwrap_or(false)
                    })
                    .collect();
                let evidence: Vec<EvidenceItem> = deploy_like
                    .iter()
                    .take(10)
                    .map(|h| self.to_evidence(h, SourceKind::Change, filter))
                    .collect();
                GatherResult::ok(
                    format!(
                        "Found {} deploy/release events and {total} total events.",
                        evidence.len()
                    ),
                    evidence,
                    Some(payload),
                )
            }
            Err(e) => {
                error!(source = "changes", error = %e, "gather failed");
                GatherResult::failed("changes search failed", Some(payload), e.to_string())
            }
        }
    }

    fn to_evidence(&self, hit: &RawHit, kind: SourceKind, filter: &EvidenceFilter) -> EvidenceItem {
        EvidenceItem {
            timestamp: hit.timestamp,
            message: hit.message.clone(),
            service: hit.service.clone(),
            trace_id: hit.trace_id.clone(),
            source: kind,
            links: self.links.for_hit(hit, kind, filter.time_range.as_ref()),
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
