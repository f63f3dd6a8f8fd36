//! End-to-end pipeline tests over mock collaborators: gating, degraded
//! runs, attempt tracking, closure injection, streaming, cancellation.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use triage_closure::ClosureMemory;
use triage_core::config::TriageConfig;
use triage_core::errors::{RetrievalError, TriageError, TriageResult};
use triage_core::models::{
    ConfidenceTier, EvidenceFilter, Incident, InvestigationRequest, PipelineStage, ProgressEvent,
    RawHit, RootCauseState, SourceKind,
};
use triage_core::traits::{IEmbeddingProvider, ITelemetryStore};
use triage_llm::ProviderChain;
use triage_pipeline::{spawn_streaming, AttemptTracker, CancelToken, InvestigationEngine};
use triage_resilience::{BreakerRegistry, RetryPolicy};

#[derive(Default)]
struct MockStore {
    ping_fails: bool,
    logs: Vec<RawHit>,
    traces: Vec<RawHit>,
    metrics: Vec<RawHit>,
    changes: Vec<RawHit>,
    incidents: Vec<Incident>,
}

fn hit(id: &str, message: &str, trace_id: Option<&str>) -> RawHit {
    RawHit {
        doc_id: id.into(),
        message: Some(message.into()),
        timestamp: None,
        service: Some("checkout".into()),
        trace_id: trace_id.map(String::from),
        tags: vec![],
    }
}

impl MockStore {
    fn healthy() -> Self {
        Self {
            logs: vec![
                hit("l1", "error: connection refused", Some("t-1")),
                hit("l2", "error: connection reset", None),
            ],
            traces: vec![
                hit("t1", "span failed with 500", Some("t-1")),
                hit("t2", "span timeout", Some("t-2")),
            ],
            metrics: vec![hit("m1", "p95 latency 2.4s", None)],
            changes: vec![hit("c1", "Deployed build 4.2.0", None)],
            incidents: vec![Incident {
                incident_id: "inc-9".into(),
                title: Some("Checkout pool exhaustion".into()),
                symptom_summary: Some("error burst".into()),
                root_cause: Some("connection pool exhaustion".into()),
                fix_steps: Some("raise pool size; restart workers".into()),
                postmortem_url: None,
                tags: vec![],
                service: Some("checkout".into()),
                env: None,
                score: 0.91,
            }],
            ..Default::default()
        }
    }
}

#[async_trait]
impl ITelemetryStore for MockStore {
    async fn ping(&self) -> TriageResult<()> {
        if self.ping_fails {
            Err(TriageError::from(RetrievalError::StoreUnreachable {
                reason: "telemetry store is not configured".into(),
            }))
        } else {
            Ok(())
        }
    }

    async fn lexical_search(
        &self,
        _query: &str,
        _filter: &EvidenceFilter,
        kind: SourceKind,
        _limit: usize,
    ) -> TriageResult<Vec<RawHit>> {
        Ok(match kind {
            SourceKind::Log => self.logs.clone(),
            SourceKind::Trace => self.traces.clone(),
            SourceKind::Metric => self.metrics.clone(),
            SourceKind::Change => vec![],
        })
    }

    async fn vector_search(
        &self,
        _embedding: &[f32],
        _filter: &EvidenceFilter,
        _kind: SourceKind,
        _limit: usize,
    ) -> TriageResult<Vec<RawHit>> {
        Ok(vec![])
    }

    async fn change_events(&self, _filter: &EvidenceFilter) -> TriageResult<Vec<RawHit>> {
        Ok(self.changes.clone())
    }

    async fn incident_search(
        &self,
        _embedding: &[f32],
        _limit: usize,
    ) -> TriageResult<Vec<Incident>> {
        Ok(self.incidents.clone())
    }
}

struct MockEmbedder {
    available: bool,
}

impl IEmbeddingProvider for MockEmbedder {
    fn embed(&self, _text: &str) -> TriageResult<Vec<f32>> {
        if self.available {
            Ok(vec![0.5; 8])
        } else {
            Err(RetrievalError::EmbeddingUnavailable {
                provider: "mock".into(),
            }
            .into())
        }
    }

    fn dimensions(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

fn engine_with(store: MockStore, embedder_available: bool) -> InvestigationEngine {
    let config = TriageConfig::default();
    let breakers = Arc::new(BreakerRegistry::from_config(&config.resilience));
    let chain = ProviderChain::new(
        breakers.clone(),
        RetryPolicy::new(1, Duration::from_millis(1), Duration::from_millis(1)),
    );
    InvestigationEngine::new(
        Arc::new(store),
        Arc::new(MockEmbedder {
            available: embedder_available,
        }),
        Arc::new(chain),
        Arc::new(ClosureMemory::new(100)),
        Arc::new(AttemptTracker::new()),
        breakers,
        config,
    )
}

fn request() -> InvestigationRequest {
    InvestigationRequest::new("why are checkout errors spiking?").with_service("checkout")
}

#[tokio::test]
async fn full_run_confirms_candidate_and_proposes_rollback() {
    let engine = engine_with(MockStore::healthy(), true);
    let report = engine.run(request()).await.unwrap();

    // All stages completed, in order.
    assert!(report.artifacts.gather_complete);
    assert!(report.artifacts.correlate_complete);
    assert!(report.artifacts.root_cause_complete);
    assert_eq!(report.artifacts.signals_total, 6);
    assert_eq!(report.artifacts.signals_gathered["logs"], 2);
    assert!((report.artifacts.correlation_score - 1.0).abs() < 1e-12);
    assert_eq!(report.artifacts.correlated_trace_ids.len(), 2);

    // No LLM configured: the candidate comes from the similar incident.
    assert_eq!(report.candidates[0].text, "connection pool exhaustion");

    // All four signals + evidence bonus: 0.70 + 0.10 = 0.80, high tier.
    assert!((report.confidence.score - 0.80).abs() < 1e-12);
    assert_eq!(report.confidence.tier, ConfidenceTier::High);

    // Re-classified with real confidence: Confirmed.
    assert_eq!(report.candidates[0].state, RootCauseState::Confirmed);

    // Deploy evidence present and gate open: rollback proposal.
    assert_eq!(report.remediations.len(), 1);
    assert!(report.remediations[0].action.contains("rollback"));

    assert!(report.missing_signals.is_empty());
    assert_eq!(report.attempt_number, 1);
    assert_eq!(
        report.attempt_message,
        "First analysis. All signal sources responding."
    );
    assert!(report.run_delta.is_none());
}

#[tokio::test]
async fn empty_sources_degrade_to_sentinel_and_broaden_scope() {
    let engine = engine_with(MockStore::default(), false);
    let report = engine.run(request()).await.unwrap();

    assert_eq!(report.confidence.score, 0.0);
    assert_eq!(report.confidence.tier, ConfidenceTier::Low);
    assert_eq!(
        report.candidates[0].text,
        "Insufficient evidence – gather more signals"
    );
    assert_eq!(report.candidates[0].state, RootCauseState::Observed);
    assert!(!report.artifacts.correlate_complete);
    assert!(!report.artifacts.root_cause_complete);
    assert_eq!(
        report.missing_signals,
        vec!["logs", "traces", "metrics", "incidents"]
    );
    // One fetch suggestion per missing source, capped at 3.
    assert_eq!(report.confidence.next_steps.len(), 3);
    assert_eq!(report.remediations[0].action, "Broaden scope or add missing signal sources");
}

#[tokio::test]
async fn unreachable_store_short_circuits_to_degraded_report() {
    let engine = engine_with(
        MockStore {
            ping_fails: true,
            ..Default::default()
        },
        true,
    );
    let report = engine.run(request()).await.unwrap();

    assert_eq!(report.confidence.score, 0.0);
    assert!(report.candidates[0].text.contains("not configured"));
    assert_eq!(report.missing_signals.len(), 4);
    assert!(report.findings.is_empty());
    assert_eq!(report.remediations[0].action, "Configure the telemetry store connection, then retry.");
}

#[tokio::test]
async fn repeated_runs_track_attempts_and_deltas() {
    let engine = engine_with(MockStore::healthy(), true);
    let first = engine.run(request()).await.unwrap();
    assert_eq!(first.attempt_number, 1);

    let second = engine.run(request()).await.unwrap();
    assert_eq!(second.attempt_number, 2);
    assert!(second.attempt_message.starts_with("Attempt 2."));

    let delta = second.run_delta.unwrap();
    assert_eq!(delta.signals_added, 0);
    assert!(delta.confidence_delta.abs() < 1e-9);
    assert!(delta.root_cause_changed);

    // A different scope starts its own attempt sequence.
    let other = engine
        .run(InvestigationRequest::new("why is search slow?"))
        .await
        .unwrap();
    assert_eq!(other.attempt_number, 1);
}

#[tokio::test]
async fn recorded_closure_is_injected_and_boosts_confidence() {
    let mut store = MockStore::default();
    store.logs = vec![hit("l1", "checkout errors spiking hard", None)];
    let engine = engine_with(store, false);

    engine.close_investigation(
        "run-past",
        "connection pool exhaustion in redis",
        ["logs".to_string()].into_iter().collect(),
        BTreeSet::new(),
        900.0,
        Some("checkout".to_string()),
        None,
        Some("why are checkout errors spiking?"),
    );

    let report = engine.run(request()).await.unwrap();

    // Keyword overlap + service match + signal overlap clears the 0.4
    // injection threshold.
    assert!(report
        .candidates
        .iter()
        .any(|c| c.text.starts_with("[Past resolution]")));
    assert!(report.confidence.contributions.contains_key("closure_match"));
}

#[tokio::test]
async fn streaming_emits_ordered_stage_events_and_final_report() {
    let engine = Arc::new(engine_with(MockStore::healthy(), true));
    let mut stream = spawn_streaming(engine, request());

    let mut events = Vec::new();
    while let Some(event) = stream.events.recv().await {
        events.push(event);
    }

    assert!(matches!(events.first(), Some(ProgressEvent::Started { .. })));
    let gather_started = events.iter().position(|e| {
        matches!(e, ProgressEvent::StageStarted { stage } if *stage == PipelineStage::Gather)
    });
    let remediation_done = events.iter().position(|e| {
        matches!(e, ProgressEvent::StageCompleted { stage } if *stage == PipelineStage::Remediation)
    });
    assert!(gather_started.unwrap() < remediation_done.unwrap());

    match events.last() {
        Some(ProgressEvent::Completed { report }) => {
            assert_eq!(report.attempt_number, 1);
            assert!(report.confidence.score > 0.5);
        }
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[tokio::test]
async fn cancelled_token_stops_at_first_stage_boundary() {
    let engine = engine_with(MockStore::healthy(), true);
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = engine
        .run_with_progress(request(), None, &cancel)
        .await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("cancelled"));
}
