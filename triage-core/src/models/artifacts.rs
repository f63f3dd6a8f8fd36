use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Machine-verifiable artifacts emitted by each pipeline stage.
///
/// The completion flags are monotone and ordered: correlation cannot
/// complete before gathering, root cause cannot complete before
/// correlation. The `complete_*` methods enforce that ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineArtifacts {
    /// Evidence count per source key ("logs", "traces", "metrics", "changes").
    pub signals_gathered: BTreeMap<String, usize>,
    pub signals_total: usize,
    /// Cross-source correlation score in [0, 1].
    pub correlation_score: f64,
    pub correlated_trace_ids: Vec<String>,
    pub gather_complete: bool,
    pub correlate_complete: bool,
    pub root_cause_complete: bool,
}

impl PipelineArtifacts {
    pub fn complete_gather(&mut self) {
        self.gather_complete = true;
    }

    /// Marks correlation complete. No-op unless gathering completed first.
    pub fn complete_correlate(&mut self) {
        if self.gather_complete {
            self.correlate_complete = true;
        }
    }

    /// Marks root-cause synthesis complete. No-op unless correlation
    /// completed first.
    pub fn complete_root_cause(&mut self) {
        if self.correlate_complete {
            self.root_cause_complete = true;
        }
    }

    /// Number of sources that returned at least one evidence item.
    pub fn sources_with_data(&self) -> usize {
        self.signals_gathered.values().filter(|c| **c > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_flags_are_ordered() {
        let mut a = PipelineArtifacts::default();
        a.complete_correlate();
        assert!(!a.correlate_complete);
        a.complete_root_cause();
        assert!(!a.root_cause_complete);

        a.complete_gather();
        a.complete_correlate();
        assert!(a.correlate_complete);
        a.complete_root_cause();
        assert!(a.root_cause_complete);
    }

    #[test]
    fn sources_with_data_ignores_empty() {
        let mut a = PipelineArtifacts::default();
        a.signals_gathered.insert("logs".into(), 3);
        a.signals_gathered.insert("traces".into(), 0);
        a.signals_gathered.insert("metrics".into(), 1);
        assert_eq!(a.sources_with_data(), 2);
    }
}
