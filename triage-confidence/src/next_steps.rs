//! Tier-driven next-step suggestions, evaluated from ordered rule
//! tables and capped at three entries.

use triage_core::constants::MAX_NEXT_STEPS;
use triage_core::models::{ConfidenceTier, TimeRangeLabel};

use crate::signals::ConfidenceSignals;

struct StepRule {
    applies: fn(&ConfidenceSignals) -> bool,
    message: &'static str,
}

const LOW_RULES: &[StepRule] = &[
    StepRule {
        applies: |s| s.is_missing("logs"),
        message: "Fetch missing logs",
    },
    StepRule {
        applies: |s| s.is_missing("traces"),
        message: "Include traces",
    },
    StepRule {
        applies: |s| s.is_missing("metrics"),
        message: "Add metrics data",
    },
    StepRule {
        applies: |s| s.is_missing("incidents"),
        message: "Search historical incidents",
    },
    StepRule {
        applies: |s| {
            s.none_missing()
                && matches!(s.time_range_label, TimeRangeLabel::M15 | TimeRangeLabel::H1)
        },
        message: "Expand time range to 6h",
    },
    StepRule {
        applies: |s| {
            s.none_missing()
                && !matches!(s.time_range_label, TimeRangeLabel::M15 | TimeRangeLabel::H1)
        },
        message: "Expand time range to 24h",
    },
    StepRule {
        applies: |s| s.none_missing(),
        message: "Try a broader service scope",
    },
];

const MEDIUM_RULES: &[StepRule] = &[
    StepRule {
        applies: |s| !s.apm_error_spike,
        message: "Include traces to correlate",
    },
    StepRule {
        applies: |s| !s.latency_anomaly,
        message: "Add metrics for anomaly detection",
    },
    StepRule {
        applies: |s| !s.alert_fired,
        message: "Check historical incidents",
    },
    StepRule {
        applies: |s| s.time_range_label == TimeRangeLabel::M15,
        message: "Expand to 1h for more context",
    },
];

const HIGH_RULES: &[StepRule] = &[
    StepRule {
        applies: |_| true,
        message: "Review proposed remediations",
    },
    StepRule {
        applies: |_| true,
        message: "Open an incident case",
    },
];

/// Fallback appended only when no rule in the tier fired.
fn fallback(tier: ConfidenceTier) -> Option<&'static str> {
    match tier {
        ConfidenceTier::Low => Some("Broaden time range or scope"),
        ConfidenceTier::Medium => Some("Add more service context"),
        ConfidenceTier::High => None,
    }
}

pub(crate) fn for_tier(tier: ConfidenceTier, signals: &ConfidenceSignals) -> Vec<String> {
    let rules = match tier {
        ConfidenceTier::Low => LOW_RULES,
        ConfidenceTier::Medium => MEDIUM_RULES,
        ConfidenceTier::High => HIGH_RULES,
    };

    let mut steps: Vec<String> = rules
        .iter()
        .filter(|rule| (rule.applies)(signals))
        .map(|rule| rule.message.to_string())
        .collect();

    if steps.is_empty() {
        if let Some(message) = fallback(tier) {
            steps.push(message.to_string());
        }
    }

    steps.truncate(MAX_NEXT_STEPS);
    steps
}
