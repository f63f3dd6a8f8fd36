use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which telemetry source an evidence item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Log,
    Trace,
    Metric,
    Change,
}

impl SourceKind {
    /// Key used in per-source count maps and missing-signal lists.
    pub fn key(&self) -> &'static str {
        match self {
            SourceKind::Log => "logs",
            SourceKind::Trace => "traces",
            SourceKind::Metric => "metrics",
            SourceKind::Change => "changes",
        }
    }
}

/// Clickable link into the observability console, attached to evidence
/// so a reviewer can see the proof behind a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLink {
    pub kind: LinkKind,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Discover,
    ApmTrace,
    MetricsDashboard,
    Postmortem,
}

/// A normalized observation used as input to root-cause reasoning.
/// Immutable once produced; no cross-source dedup is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub timestamp: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub service: Option<String>,
    pub trace_id: Option<String>,
    pub source: SourceKind,
    #[serde(default)]
    pub links: Vec<EvidenceLink>,
}

/// A raw document returned by the telemetry store, before fusion and
/// link decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    pub doc_id: String,
    pub message: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub service: Option<String>,
    pub trace_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
