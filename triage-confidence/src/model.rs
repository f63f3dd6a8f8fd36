//! Rule evaluation: walk the tables, sum contributions, clamp, tier.

use std::collections::BTreeMap;

use triage_core::constants::{CONFIDENCE_CEILING, MISSING_PENALTY_CAP, MISSING_SOURCE_PENALTY};
use triage_core::models::{ConfidenceResult, ConfidenceTier};

use crate::next_steps;
use crate::rules::{CLOSURE_BONUSES, EVIDENCE_BONUSES, SIGNAL_RULES};
use crate::signals::ConfidenceSignals;

/// Compute the confidence for one run.
///
/// Additive over the rule tables, then the missing-source penalty
/// (capped), then a clamp to [0, 0.95]. Tier and next steps follow
/// from the clamped score.
pub fn evaluate(signals: &ConfidenceSignals) -> ConfidenceResult {
    let mut score = 0.0;
    let mut reasons: Vec<String> = Vec::new();
    let mut contributions: BTreeMap<String, f64> = BTreeMap::new();

    for rule in SIGNAL_RULES {
        if (rule.applies)(signals) {
            score += rule.weight;
            reasons.push(rule.reason.to_string());
            contributions.insert(rule.name.to_string(), rule.weight);
        }
    }

    for bonus in CLOSURE_BONUSES {
        if signals.closure_match_score >= bonus.min_score {
            score += bonus.weight;
            reasons.push(format!(
                "{} match to previously resolved incident ({:.0}%)",
                bonus.qualifier,
                signals.closure_match_score * 100.0
            ));
            contributions.insert("closure_match".to_string(), bonus.weight);
            break;
        }
    }

    if signals.evidence_count == 0 {
        reasons.push("No evidence found".to_string());
        contributions.insert("evidence_count".to_string(), 0.0);
    } else {
        for bonus in EVIDENCE_BONUSES {
            if signals.evidence_count >= bonus.min_count {
                score += bonus.weight;
                reasons.push(format!(
                    "{} evidence items ({})",
                    signals.evidence_count, bonus.qualifier
                ));
                contributions.insert("evidence_count".to_string(), bonus.weight);
                break;
            }
        }
    }

    let mut missing_penalty = 0.0;
    for name in signals.missing_sources() {
        missing_penalty += MISSING_SOURCE_PENALTY;
        reasons.push(format!("Missing source: {name}"));
        contributions.insert(format!("missing_{name}"), -MISSING_SOURCE_PENALTY);
    }
    score -= missing_penalty.min(MISSING_PENALTY_CAP);

    if reasons.is_empty() {
        reasons.push("No signals detected — broaden scope".to_string());
    }

    let score = score.clamp(0.0, CONFIDENCE_CEILING);
    let tier = ConfidenceTier::from_score(score);
    let next_steps = next_steps::for_tier(tier, signals);

    ConfidenceResult {
        score,
        reasons,
        tier,
        next_steps,
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use triage_core::models::TimeRangeLabel;

    use super::*;

    #[test]
    fn nothing_set_scores_zero() {
        let result = evaluate(&ConfidenceSignals::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.tier, ConfidenceTier::Low);
    }

    #[test]
    fn every_applied_rule_records_its_contribution() {
        let signals = ConfidenceSignals {
            apm_error_spike: true,
            alert_fired: true,
            evidence_count: 5,
            ..Default::default()
        };
        let result = evaluate(&signals);
        assert_eq!(result.contributions["apm_errors"], 0.20);
        assert_eq!(result.contributions["alert"], 0.10);
        assert_eq!(result.contributions["evidence_count"], 0.10);
        assert!((result.score - 0.40).abs() < 1e-12);
    }

    #[test]
    fn closure_bonus_uses_first_matching_threshold() {
        let strong = evaluate(&ConfidenceSignals {
            closure_match_score: 0.8,
            ..Default::default()
        });
        assert_eq!(strong.contributions["closure_match"], 0.15);

        let moderate = evaluate(&ConfidenceSignals {
            closure_match_score: 0.5,
            ..Default::default()
        });
        assert_eq!(moderate.contributions["closure_match"], 0.08);

        let below = evaluate(&ConfidenceSignals {
            closure_match_score: 0.3,
            ..Default::default()
        });
        assert!(!below.contributions.contains_key("closure_match"));
    }

    #[test]
    fn missing_penalty_is_capped() {
        let mut signals = ConfidenceSignals {
            apm_error_spike: true,
            log_error_burst: true,
            latency_anomaly: true,
            time_range_label: TimeRangeLabel::H1,
            ..Default::default()
        };
        for name in ["a", "b", "c", "d", "e", "f"] {
            signals.sources_available.insert(name.to_string(), false);
        }
        let result = evaluate(&signals);
        // 0.60 earned, penalty capped at 0.20 even with 6 missing.
        assert!((result.score - 0.40).abs() < 1e-12);
    }
}
