//! The closure ring buffer: last N resolutions, mutex-guarded, with an
//! optional durable mirror.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use triage_core::models::{ClosureRecord, EvidenceItem};
use triage_core::traits::IClosureStore;
use triage_core::TriageResult;

use crate::matcher;

/// Bounded in-process store of past resolutions. Records are appended
/// on investigation close and never mutated; the oldest fall off beyond
/// `capacity`. Safe to share across concurrent investigations.
pub struct ClosureMemory {
    capacity: usize,
    inner: Mutex<VecDeque<ClosureRecord>>,
    store: Option<Box<dyn IClosureStore>>,
}

impl ClosureMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(VecDeque::new()),
            store: None,
        }
    }

    /// With a durable mirror: records are persisted best-effort and can
    /// be reloaded across restarts.
    pub fn with_store(capacity: usize, store: Box<dyn IClosureStore>) -> Self {
        Self {
            capacity,
            inner: Mutex::new(VecDeque::new()),
            store: Some(store),
        }
    }

    /// Replace the buffer with the newest records from the mirror.
    /// Without a mirror this is a no-op returning 0.
    pub fn load_from_store(&self) -> TriageResult<usize> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        let mut records = store.load_recent(self.capacity)?;
        // Stored newest-first; the buffer keeps oldest-first.
        records.reverse();
        let count = records.len();
        let mut inner = self.lock();
        inner.clear();
        inner.extend(records);
        info!(count, "loaded closures from durable store");
        Ok(count)
    }

    /// Append a closure. Eviction is recency-only: beyond capacity the
    /// oldest record is dropped. Mirror failures are logged, never
    /// surfaced.
    pub fn record(&self, record: ClosureRecord) {
        if let Some(store) = &self.store {
            if let Err(e) = store.persist(&record) {
                warn!(run_id = %record.run_id, error = %e, "failed to mirror closure");
            }
        }
        let mut inner = self.lock();
        inner.push_back(record);
        while inner.len() > self.capacity {
            inner.pop_front();
        }
        debug!(len = inner.len(), "closure recorded");
    }

    /// Best match against the stored closures; `None` when nothing
    /// scores above zero.
    pub fn best_match(
        &self,
        question: &str,
        service: Option<&str>,
        findings: &[EvidenceItem],
    ) -> Option<(f64, ClosureRecord)> {
        let inner = self.lock();
        let records: Vec<ClosureRecord> = inner.iter().cloned().collect();
        drop(inner);
        matcher::best_match(question, service, findings, &records)
            .map(|m| (m.score, m.closure.clone()))
    }

    pub fn snapshot(&self) -> Vec<ClosureRecord> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ClosureRecord>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
