use serde::{Deserialize, Serialize};

use super::artifacts::PipelineArtifacts;
use super::attempt::RunDelta;
use super::confidence::ConfidenceResult;
use super::evidence::{EvidenceItem, EvidenceLink};
use super::incident::Incident;
use super::remediation::Remediation;
use super::root_cause::RootCauseCandidate;
use super::scope::{Scope, TimeRange};

/// Input to a single investigation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationRequest {
    pub question: String,
    pub service: Option<String>,
    pub env: Option<String>,
    /// Defaults to the last hour when absent.
    pub time_range: Option<TimeRange>,
}

impl InvestigationRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            service: None,
            env: None,
            time_range: None,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }
}

/// Structured result of one investigation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationReport {
    pub run_id: String,
    pub scope: Scope,
    pub findings: Vec<EvidenceItem>,
    pub similar_incidents: Vec<Incident>,
    pub candidates: Vec<RootCauseCandidate>,
    pub remediations: Vec<Remediation>,
    pub confidence: ConfidenceResult,
    pub evidence_links: Vec<EvidenceLink>,
    pub attempt_number: u32,
    pub attempt_message: String,
    pub missing_signals: Vec<String>,
    pub artifacts: PipelineArtifacts,
    /// Present from the second attempt on the same scope onward.
    pub run_delta: Option<RunDelta>,
}
