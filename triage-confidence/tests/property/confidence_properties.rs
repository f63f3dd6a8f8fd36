//! Property tests for the confidence model invariants.

use std::collections::BTreeMap;

use proptest::prelude::*;

use triage_confidence::{evaluate, ConfidenceSignals};
use triage_core::models::ConfidenceTier;

fn arb_signals() -> impl Strategy<Value = ConfidenceSignals> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0.0_f64..1.0,
        0_usize..50,
        prop::collection::btree_map("[a-z]{3,8}", any::<bool>(), 0..6),
    )
        .prop_map(
            |(apm, logs, latency, alert, closure, evidence, sources)| ConfidenceSignals {
                apm_error_spike: apm,
                log_error_burst: logs,
                latency_anomaly: latency,
                alert_fired: alert,
                closure_match_score: closure,
                evidence_count: evidence,
                sources_available: sources,
                ..Default::default()
            },
        )
}

proptest! {
    #[test]
    fn score_is_always_bounded(signals in arb_signals()) {
        let result = evaluate(&signals);
        prop_assert!(result.score >= 0.0);
        prop_assert!(result.score <= 0.95);
    }

    #[test]
    fn adding_a_true_signal_never_decreases_score(signals in arb_signals()) {
        let base = evaluate(&signals).score;
        for flip in 0..4 {
            let mut boosted = signals.clone();
            match flip {
                0 => boosted.apm_error_spike = true,
                1 => boosted.log_error_burst = true,
                2 => boosted.latency_anomaly = true,
                _ => boosted.alert_fired = true,
            }
            prop_assert!(evaluate(&boosted).score >= base);
        }
    }

    #[test]
    fn more_evidence_never_decreases_score(signals in arb_signals(), extra in 1_usize..40) {
        let base = evaluate(&signals).score;
        let mut more = signals.clone();
        more.evidence_count += extra;
        prop_assert!(evaluate(&more).score >= base);
    }

    #[test]
    fn missing_penalty_never_exceeds_cap(signals in arb_signals()) {
        let mut no_missing = signals.clone();
        no_missing.sources_available =
            signals.sources_available.keys().map(|k| (k.clone(), true)).collect::<BTreeMap<_, _>>();
        let best = evaluate(&no_missing).score;
        let worst = evaluate(&signals).score;
        // Whatever is missing, the gap is at most the 0.20 cap.
        prop_assert!(best - worst <= 0.20 + 1e-12);
    }

    #[test]
    fn tier_matches_score_thresholds(signals in arb_signals()) {
        let result = evaluate(&signals);
        let expected = if result.score >= 0.55 {
            ConfidenceTier::High
        } else if result.score >= 0.25 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        };
        prop_assert_eq!(result.tier, expected);
    }

    #[test]
    fn next_steps_never_exceed_three(signals in arb_signals()) {
        prop_assert!(evaluate(&signals).next_steps.len() <= 3);
    }
}
