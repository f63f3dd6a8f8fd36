use async_trait::async_trait;

use crate::errors::TriageResult;
use crate::models::{EvidenceFilter, Incident, RawHit, SourceKind};

/// The telemetry backend: logs, traces, metrics, change events, and the
/// incident knowledge base. Every method is a network round-trip.
#[async_trait]
pub trait ITelemetryStore: Send + Sync {
    /// Cheap reachability check, run once before a pipeline starts.
    async fn ping(&self) -> TriageResult<()>;

    /// Text match against message/tags under the strict filter.
    async fn lexical_search(
        &self,
        query: &str,
        filter: &EvidenceFilter,
        kind: SourceKind,
        limit: usize,
    ) -> TriageResult<Vec<RawHit>>;

    /// Nearest-neighbor search by query embedding under the strict filter.
    async fn vector_search(
        &self,
        embedding: &[f32],
        filter: &EvidenceFilter,
        kind: SourceKind,
        limit: usize,
    ) -> TriageResult<Vec<RawHit>>;

    /// Plain time+service filtered query over change/deploy events.
    async fn change_events(&self, filter: &EvidenceFilter) -> TriageResult<Vec<RawHit>>;

    /// Nearest-neighbor search over the resolved-incident knowledge base.
    async fn incident_search(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> TriageResult<Vec<Incident>>;
}
