//! The scoring rule tables. Weights are part of the scoring contract;
//! changing one changes every downstream tier decision.

use crate::signals::ConfidenceSignals;

/// A boolean signal worth a fixed weight when it fires.
pub(crate) struct SignalRule {
    pub name: &'static str,
    pub weight: f64,
    pub applies: fn(&ConfidenceSignals) -> bool,
    pub reason: &'static str,
}

pub(crate) const SIGNAL_RULES: &[SignalRule] = &[
    SignalRule {
        name: "apm_errors",
        weight: 0.20,
        applies: |s| s.apm_error_spike,
        reason: "APM errors spike in same window",
    },
    SignalRule {
        name: "logs_burst",
        weight: 0.20,
        applies: |s| s.log_error_burst,
        reason: "Logs error burst matches time window",
    },
    SignalRule {
        name: "latency",
        weight: 0.20,
        applies: |s| s.latency_anomaly,
        reason: "Latency p95 increase detected",
    },
    SignalRule {
        name: "alert",
        weight: 0.10,
        applies: |s| s.alert_fired,
        reason: "Alert fired for same service",
    },
];

/// Scalar signal bucketed by threshold; first matching row wins.
pub(crate) struct ClosureBonus {
    pub min_score: f64,
    pub weight: f64,
    pub qualifier: &'static str,
}

pub(crate) const CLOSURE_BONUSES: &[ClosureBonus] = &[
    ClosureBonus {
        min_score: 0.7,
        weight: 0.15,
        qualifier: "Strong",
    },
    ClosureBonus {
        min_score: 0.4,
        weight: 0.08,
        qualifier: "Moderate",
    },
];

/// Evidence-count bonus steps; first matching row wins.
pub(crate) struct EvidenceBonus {
    pub min_count: usize,
    pub weight: f64,
    pub qualifier: &'static str,
}

pub(crate) const EVIDENCE_BONUSES: &[EvidenceBonus] = &[
    EvidenceBonus {
        min_count: 10,
        weight: 0.15,
        qualifier: "strong",
    },
    EvidenceBonus {
        min_count: 5,
        weight: 0.10,
        qualifier: "good",
    },
    EvidenceBonus {
        min_count: 2,
        weight: 0.05,
        qualifier: "minimal",
    },
];
