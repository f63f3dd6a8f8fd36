use serde::{Deserialize, Serialize};

use super::report::InvestigationReport;

/// Stages of the gated pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Scope,
    Gather,
    Correlate,
    SimilarIncidents,
    RootCause,
    Remediation,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Scope,
        PipelineStage::Gather,
        PipelineStage::Correlate,
        PipelineStage::SimilarIncidents,
        PipelineStage::RootCause,
        PipelineStage::Remediation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Scope => "scope",
            PipelineStage::Gather => "gather",
            PipelineStage::Correlate => "correlate",
            PipelineStage::SimilarIncidents => "similar_incidents",
            PipelineStage::RootCause => "root_cause",
            PipelineStage::Remediation => "remediation",
        }
    }
}

/// Typed progress notification published by the streaming pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    Started {
        run_id: String,
        stages: Vec<PipelineStage>,
    },
    StageStarted {
        stage: PipelineStage,
    },
    StageCompleted {
        stage: PipelineStage,
    },
    /// Free-text progress note within a stage.
    Note {
        message: String,
    },
    Completed {
        report: Box<InvestigationReport>,
    },
    Failed {
        message: String,
    },
}
