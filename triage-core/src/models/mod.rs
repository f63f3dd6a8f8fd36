//! Data model for the investigation pipeline, one type family per file.

mod artifacts;
mod attempt;
mod closure;
mod confidence;
mod evidence;
mod gather;
mod incident;
mod progress;
mod remediation;
mod report;
mod root_cause;
mod scope;

pub use artifacts::PipelineArtifacts;
pub use attempt::{AttemptRecord, RunDelta};
pub use closure::ClosureRecord;
pub use confidence::{ConfidenceResult, ConfidenceTier};
pub use evidence::{EvidenceItem, EvidenceLink, LinkKind, RawHit, SourceKind};
pub use gather::GatherResult;
pub use incident::Incident;
pub use progress::{PipelineStage, ProgressEvent};
pub use remediation::{Remediation, RiskLevel};
pub use report::{InvestigationReport, InvestigationRequest};
pub use root_cause::{RootCauseCandidate, RootCauseState};
pub use scope::{EvidenceFilter, Scope, TimeRange, TimeRangeLabel};
