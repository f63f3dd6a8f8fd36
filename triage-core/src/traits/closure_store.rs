use crate::errors::TriageResult;
use crate::models::ClosureRecord;

/// Optional durable backing for closure memory. The in-memory ring
/// buffer works standalone; a store only adds persistence across
/// process restarts.
pub trait IClosureStore: Send + Sync {
    fn persist(&self, record: &ClosureRecord) -> TriageResult<()>;

    /// Newest-first load, bounded by `limit`.
    fn load_recent(&self, limit: usize) -> TriageResult<Vec<ClosureRecord>>;
}
