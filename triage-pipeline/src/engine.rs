//! The investigation engine: gated stages over injected collaborators.
//!
//! Stage order per run: scope → gather (4 sources, sequential) →
//! correlate → similar incidents → root-cause synthesis → state
//! classification → remediation gating → closure matching → confidence
//! → re-classification → attempt tracking. Everything that can degrade,
//! degrades inside the run; only unexpected internal faults surface as
//! errors.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use triage_closure::{extract_keywords, ClosureMemory, SqliteClosureStore};
use triage_confidence::{evaluate, ConfidenceSignals};
use triage_core::config::TriageConfig;
use triage_core::constants::{
    CLOSURE_INJECTION_THRESHOLD, INSUFFICIENT_EVIDENCE_SENTINEL, PAST_RESOLUTION_PREFIX,
};
use triage_core::errors::TriageResult;
use triage_core::models::{
    ClosureRecord, ConfidenceResult, EvidenceFilter, EvidenceItem, EvidenceLink, GatherResult,
    InvestigationReport, InvestigationRequest, PipelineArtifacts, PipelineStage, ProgressEvent,
    Remediation, RootCauseCandidate, RootCauseState, Scope, SourceKind, TimeRange,
};
use triage_core::traits::{IEmbeddingProvider, ITelemetryStore};
use triage_llm::{HttpLlmClient, ProviderChain};
use triage_resilience::{BreakerRegistry, RetryPolicy};
use triage_retrieval::{ConsoleLinks, EvidenceGatherer, IncidentMatcher};

use crate::attempts::{scope_fingerprint, AttemptTracker};
use crate::states::{best_state, classify, StateInputs};
use crate::streaming::{publish, CancelToken};
use crate::synthesis::{truncate, Synthesizer};
use crate::validators::{validate_before_propose, Claim};

/// Acknowledgement for a recorded closure.
#[derive(Debug, Clone)]
pub struct ClosureAck {
    pub run_id: String,
    /// Closures currently held in memory after the append.
    pub total_closures: usize,
}

/// Orchestrates one investigation per call. All cross-run state — the
/// attempt history, closure memory, and breaker registry — is owned
/// here as injected, internally synchronized repositories, so engines
/// can be shared across concurrent investigations.
pub struct InvestigationEngine {
    store: Arc<dyn ITelemetryStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    llm: Arc<ProviderChain>,
    closures: Arc<ClosureMemory>,
    attempts: Arc<AttemptTracker>,
    breakers: Arc<BreakerRegistry>,
    links: ConsoleLinks,
    policy: RetryPolicy,
    call_timeout: Duration,
    config: TriageConfig,
}

impl InvestigationEngine {
    pub fn new(
        store: Arc<dyn ITelemetryStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        llm: Arc<ProviderChain>,
        closures: Arc<ClosureMemory>,
        attempts: Arc<AttemptTracker>,
        breakers: Arc<BreakerRegistry>,
        config: TriageConfig,
    ) -> Self {
        Self {
            links: ConsoleLinks::new(config.retrieval.console_base_url.clone()),
            policy: RetryPolicy::from_config(&config.resilience),
            call_timeout: Duration::from_secs(config.resilience.call_timeout_secs),
            store,
            embedder,
            llm,
            closures,
            attempts,
            breakers,
            config,
        }
    }

    /// Wire an engine from config alone: fresh repositories, an HTTP
    /// LLM provider when configured, and the SQLite closure mirror when
    /// a durable path is set.
    pub fn from_config(
        store: Arc<dyn ITelemetryStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: TriageConfig,
    ) -> Self {
        let breakers = Arc::new(BreakerRegistry::from_config(&config.resilience));

        let mut chain = ProviderChain::new(
            breakers.clone(),
            RetryPolicy::new(2, Duration::from_secs(1), Duration::from_secs(5)),
        );
        if let Some(client) = HttpLlmClient::from_config(&config.llm) {
            chain.push(Box::new(client));
        }

        let closures = match &config.closure.durable_path {
            Some(path) => match SqliteClosureStore::open(Path::new(path)) {
                Ok(sqlite) => {
                    let memory =
                        ClosureMemory::with_store(config.closure.capacity, Box::new(sqlite));
                    if let Err(e) = memory.load_from_store() {
                        warn!(error = %e, "could not load closures from durable store");
                    }
                    memory
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "closure store unavailable, using in-memory only");
                    ClosureMemory::new(config.closure.capacity)
                }
            },
            None => ClosureMemory::new(config.closure.capacity),
        };

        Self::new(
            store,
            embedder,
            Arc::new(chain),
            Arc::new(closures),
            Arc::new(AttemptTracker::new()),
            breakers,
            config,
        )
    }

    pub fn closures(&self) -> &ClosureMemory {
        &self.closures
    }

    pub fn attempts(&self) -> &AttemptTracker {
        &self.attempts
    }

    pub fn breakers(&self) -> &BreakerRegistry {
        &self.breakers
    }

    /// Run one investigation to completion.
    pub async fn run(&self, request: InvestigationRequest) -> TriageResult<InvestigationReport> {
        self.run_with_progress(request, None, &CancelToken::new())
            .await
    }

    /// Run one investigation, publishing progress events when a channel
    /// is given and honoring `cancel` at each stage boundary.
    pub async fn run_with_progress(
        &self,
        request: InvestigationRequest,
        progress: Option<&mpsc::Sender<ProgressEvent>>,
        cancel: &CancelToken,
    ) -> TriageResult<InvestigationReport> {
        let run_id = Uuid::new_v4().to_string();
        publish(
            progress,
            ProgressEvent::Started {
                run_id: run_id.clone(),
                stages: PipelineStage::ALL.to_vec(),
            },
        );
        cancel.check()?;

        // ── Stage 1: scope ──
        publish(progress, ProgressEvent::StageStarted { stage: PipelineStage::Scope });
        let time_range = request.time_range.unwrap_or_else(TimeRange::last_hour);
        let scope = Scope {
            question: request.question.clone(),
            service: request.service.clone(),
            env: request.env.clone(),
            time_range,
        };
        let filter = EvidenceFilter {
            time_range: Some(time_range),
            service: request.service.clone(),
            env: request.env.clone(),
            top_k: self.config.retrieval.evidence_top_k,
        };
        let fingerprint = scope_fingerprint(
            &request.question,
            request.service.as_deref(),
            request.env.as_deref(),
        );
        publish(progress, ProgressEvent::StageCompleted { stage: PipelineStage::Scope });

        // Unreachable store short-circuits to a degraded result.
        publish(
            progress,
            ProgressEvent::Note {
                message: "Checking telemetry store connection...".to_string(),
            },
        );
        if let Err(e) = self.store.ping().await {
            warn!(run_id = %run_id, error = %e, "telemetry store unreachable, degraded run");
            let report = self.degraded_report(run_id, scope, e.to_string());
            publish(
                progress,
                ProgressEvent::Completed {
                    report: Box::new(report.clone()),
                },
            );
            return Ok(report);
        }
        cancel.check()?;

        // ── Stage 2: gather (sequential across the four sources) ──
        publish(progress, ProgressEvent::StageStarted { stage: PipelineStage::Gather });
        let gatherer = EvidenceGatherer::new(
            &*self.store,
            &*self.embedder,
            &self.breakers,
            &self.links,
            self.policy,
            self.call_timeout,
            self.config.retrieval.rrf_k,
        );

        let log_res = gatherer.gather(SourceKind::Log, &request.question, &filter).await;
        note(progress, format!("Found {} relevant log entries.", log_res.evidence.len()));
        let trace_res = gatherer.gather(SourceKind::Trace, &request.question, &filter).await;
        note(progress, format!("Found {} traces matching criteria.", trace_res.evidence.len()));
        let metrics_res = gatherer.gather(SourceKind::Metric, &request.question, &filter).await;
        note(progress, format!("Analyzed metrics: found {} anomalies.", metrics_res.evidence.len()));
        let changes_res = gatherer.gather_changes(&filter).await;
        note(progress, format!("Checked for recent deployments: found {}.", changes_res.evidence.len()));

        let mut findings: Vec<EvidenceItem> = Vec::new();
        for result in [&log_res, &trace_res, &metrics_res, &changes_res] {
            findings.extend(result.evidence.iter().cloned());
        }

        let mut artifacts = PipelineArtifacts::default();
        artifacts.signals_gathered = per_source_counts(&log_res, &trace_res, &metrics_res, &changes_res);
        artifacts.signals_total = findings.len();
        artifacts.complete_gather();

        let mut missing_signals: Vec<String> = Vec::new();
        for (result, kind) in [
            (&log_res, SourceKind::Log),
            (&trace_res, SourceKind::Trace),
            (&metrics_res, SourceKind::Metric),
        ] {
            if result.is_empty() {
                missing_signals.push(kind.key().to_string());
            }
        }
        publish(progress, ProgressEvent::StageCompleted { stage: PipelineStage::Gather });
        cancel.check()?;

        // ── Stage 3: correlate ──
        publish(progress, ProgressEvent::StageStarted { stage: PipelineStage::Correlate });
        note(progress, "Correlating events across signals...".to_string());
        let trace_ids: BTreeSet<String> = findings
            .iter()
            .filter_map(|f| f.trace_id.clone())
            .collect();
        artifacts.correlated_trace_ids = trace_ids.into_iter().collect();

        let sources_with_data = artifacts.sources_with_data();
        artifacts.correlation_score = (sources_with_data as f64 / 3.0).min(1.0);
        if sources_with_data >= 1 {
            artifacts.complete_correlate();
        }
        publish(progress, ProgressEvent::StageCompleted { stage: PipelineStage::Correlate });
        cancel.check()?;

        // ── Stage 4: similar incidents ──
        publish(
            progress,
            ProgressEvent::StageStarted { stage: PipelineStage::SimilarIncidents },
        );
        note(progress, "Searching for similar resolved incidents...".to_string());
        let matcher = IncidentMatcher::new(
            &*self.store,
            &*self.embedder,
            &self.breakers,
            self.policy,
            self.call_timeout,
        );
        let (similar_incidents, _incident_error) = matcher
            .find_similar(
                &request.question,
                request.service.as_deref(),
                request.env.as_deref(),
                self.config.retrieval.incident_top_k,
            )
            .await;
        if similar_incidents.is_empty() {
            missing_signals.push("incidents".to_string());
        } else {
            artifacts.correlation_score = (artifacts.correlation_score + 0.2).min(1.0);
            note(
                progress,
                format!("Found {} similar past incidents.", similar_incidents.len()),
            );
        }
        publish(
            progress,
            ProgressEvent::StageCompleted { stage: PipelineStage::SimilarIncidents },
        );
        cancel.check()?;

        // ── Stage 5: root-cause candidates (gated by correlation) ──
        publish(progress, ProgressEvent::StageStarted { stage: PipelineStage::RootCause });
        let synthesizer = Synthesizer::new(&self.llm, &self.config.llm);
        let mut candidate_texts: Vec<String> = if artifacts.correlate_complete {
            note(progress, "Analyzing findings to identify root cause...".to_string());
            synthesizer
                .root_cause_candidates(
                    &request.question,
                    &findings,
                    &similar_incidents,
                    !changes_res.evidence.is_empty(),
                )
                .await
        } else {
            Vec::new()
        };
        if candidate_texts.is_empty() {
            candidate_texts.push(INSUFFICIENT_EVIDENCE_SENTINEL.to_string());
        }
        if candidate_texts[0] != INSUFFICIENT_EVIDENCE_SENTINEL {
            artifacts.complete_root_cause();
        }

        // First-pass classification; confidence is not yet known.
        let state_inputs = |confidence: f64| StateInputs {
            findings_count: findings.len(),
            correlation_score: artifacts.correlation_score,
            similar_incident: !similar_incidents.is_empty(),
            confidence,
        };
        let mut candidates: Vec<RootCauseCandidate> = candidate_texts
            .into_iter()
            .map(|text| RootCauseCandidate {
                state: classify(&state_inputs(0.0)),
                text,
            })
            .collect();
        publish(progress, ProgressEvent::StageCompleted { stage: PipelineStage::RootCause });
        cancel.check()?;

        // ── Stage 6: remediation (gated by best state) ──
        publish(
            progress,
            ProgressEvent::StageStarted { stage: PipelineStage::Remediation },
        );
        let remediations = self
            .propose_remediations(&synthesizer, &candidates, &findings, &similar_incidents)
            .await;
        publish(
            progress,
            ProgressEvent::StageCompleted { stage: PipelineStage::Remediation },
        );

        // ── Closure memory matching ──
        let closure_match = self.closures.best_match(
            &request.question,
            request.service.as_deref(),
            &findings,
        );
        let closure_match_score = closure_match.as_ref().map(|(s, _)| *s).unwrap_or(0.0);
        if let Some((score, closure)) = &closure_match {
            if *score >= CLOSURE_INJECTION_THRESHOLD {
                self.inject_closure_candidate(&mut candidates, closure, *score);
            }
        }

        // ── Confidence ──
        let sources_available: BTreeMap<String, bool> = [
            ("logs", !log_res.is_empty()),
            ("metrics", !metrics_res.is_empty()),
            ("traces", !trace_res.is_empty()),
            ("incidents", !similar_incidents.is_empty()),
        ]
        .into_iter()
        .map(|(name, available)| (name.to_string(), available))
        .collect();

        let confidence = evaluate(&ConfidenceSignals {
            apm_error_spike: !trace_res.is_empty(),
            log_error_burst: !log_res.is_empty(),
            latency_anomaly: !metrics_res.is_empty(),
            alert_fired: !similar_incidents.is_empty(),
            closure_match_score,
            evidence_count: findings.len(),
            sources_available,
            time_range_label: time_range.label(),
        });

        // Re-classify now that confidence is known.
        for candidate in &mut candidates {
            candidate.state = classify(&state_inputs(confidence.score));
        }

        let evidence_links: Vec<EvidenceLink> = findings
            .iter()
            .take(15)
            .flat_map(|f| f.links.iter().cloned())
            .collect();

        // ── Attempt tracking + run delta ──
        let root_cause_found = candidates
            .first()
            .map(|c| c.text != INSUFFICIENT_EVIDENCE_SENTINEL)
            .unwrap_or(false);
        let outcome = self.attempts.record(
            &fingerprint,
            confidence.score,
            &missing_signals,
            &artifacts.signals_gathered,
            root_cause_found,
        );

        info!(
            run_id = %run_id,
            attempt = outcome.attempt_number,
            confidence = confidence.score,
            findings = findings.len(),
            "investigation complete"
        );

        let report = InvestigationReport {
            run_id,
            scope,
            findings,
            similar_incidents,
            candidates,
            remediations,
            confidence,
            evidence_links,
            attempt_number: outcome.attempt_number,
            attempt_message: outcome.message,
            missing_signals,
            artifacts,
            run_delta: outcome.delta,
        };
        publish(
            progress,
            ProgressEvent::Completed {
                report: Box::new(report.clone()),
            },
        );
        Ok(report)
    }

    /// Record learnings from a resolved investigation.
    pub fn close_investigation(
        &self,
        run_id: &str,
        root_cause: &str,
        signals_used: BTreeSet<String>,
        false_leads: BTreeSet<String>,
        resolution_seconds: f64,
        service: Option<String>,
        env: Option<String>,
        question: Option<&str>,
    ) -> ClosureAck {
        let record = ClosureRecord {
            run_id: run_id.to_string(),
            root_cause: root_cause.to_string(),
            signals_used,
            false_leads,
            resolution_seconds,
            service,
            env,
            question_keywords: question.map(extract_keywords).unwrap_or_default(),
            recorded_at: Utc::now(),
        };
        info!(run_id = %run_id, root_cause = truncate(root_cause, 80), "closure recorded");
        self.closures.record(record);
        ClosureAck {
            run_id: run_id.to_string(),
            total_closures: self.closures.len(),
        }
    }

    /// Remediation gating: only Probable/Confirmed may propose concrete
    /// fixes, and only past the evidence/citation validators.
    async fn propose_remediations(
        &self,
        synthesizer: &Synthesizer<'_>,
        candidates: &[RootCauseCandidate],
        findings: &[EvidenceItem],
        incidents: &[triage_core::models::Incident],
    ) -> Vec<Remediation> {
        match best_state(candidates) {
            RootCauseState::Probable | RootCauseState::Confirmed => {
                let claims: Vec<Claim> = candidates
                    .iter()
                    .map(|c| Claim {
                        statement: c.text.clone(),
                        citations: findings.len().min(2),
                    })
                    .collect();
                match validate_before_propose(findings.len() + incidents.len(), &claims) {
                    Ok(()) => synthesizer.propose_remediations(findings, incidents).await,
                    Err(errors) => {
                        info!(?errors, "remediation blocked by validators");
                        vec![Remediation::low_risk(
                            "Gather more evidence before applying fix",
                        )]
                    }
                }
            }
            RootCauseState::Correlated => vec![Remediation::low_risk(
                "Gather more evidence to confirm hypothesis",
            )],
            RootCauseState::Observed => vec![Remediation::low_risk(
                "Broaden scope or add missing signal sources",
            )],
        }
    }

    /// Inject a past resolution as a candidate unless its root cause is
    /// already covered by an existing candidate.
    fn inject_closure_candidate(
        &self,
        candidates: &mut Vec<RootCauseCandidate>,
        closure: &ClosureRecord,
        score: f64,
    ) {
        if closure.root_cause.is_empty() {
            return;
        }
        let already_present = candidates
            .iter()
            .any(|c| c.text.contains(&closure.root_cause));
        if already_present {
            return;
        }
        info!(
            root_cause = truncate(&closure.root_cause, 60),
            score, "closure memory injected root cause"
        );
        candidates.push(RootCauseCandidate {
            text: format!(
                "{PAST_RESOLUTION_PREFIX} {}",
                truncate(&closure.root_cause, 200)
            ),
            state: RootCauseState::Observed,
        });
    }

    fn degraded_report(&self, run_id: String, scope: Scope, reason: String) -> InvestigationReport {
        InvestigationReport {
            run_id,
            scope,
            findings: Vec::new(),
            similar_incidents: Vec::new(),
            candidates: vec![RootCauseCandidate {
                text: reason.clone(),
                state: RootCauseState::Observed,
            }],
            remediations: vec![Remediation::low_risk(
                "Configure the telemetry store connection, then retry.",
            )],
            confidence: ConfidenceResult::zero(vec![reason.clone()]),
            evidence_links: Vec::new(),
            attempt_number: 1,
            attempt_message: reason,
            missing_signals: ["logs", "metrics", "traces", "incidents"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            artifacts: PipelineArtifacts::default(),
            run_delta: None,
        }
    }
}

fn per_source_counts(
    logs: &GatherResult,
    traces: &GatherResult,
    metrics: &GatherResult,
    changes: &GatherResult,
) -> BTreeMap<String, usize> {
    [
        (SourceKind::Log, logs),
        (SourceKind::Trace, traces),
        (SourceKind::Metric, metrics),
        (SourceKind::Change, changes),
    ]
    .into_iter()
    .map(|(kind, result)| (kind.key().to_string(), result.evidence.len()))
    .collect()
}

fn note(progress: Option<&mpsc::Sender<ProgressEvent>>, message: String) {
    publish(progress, ProgressEvent::Note { message });
}
