//! Fuzzy matching of the current investigation against stored closures.
//!
//! The match score is the sum of four independently capped components:
//! keyword overlap (≤0.4), exact service match (0.2), root-cause text
//! appearing in current findings (0.3), and signal-type overlap (0.1).
//! The sum is capped at 1.0.

use std::collections::BTreeSet;

use triage_core::models::{ClosureRecord, EvidenceItem};

use crate::keywords::extract_keywords;

/// The best-scoring closure for a query, with its score.
#[derive(Debug, Clone)]
pub struct ClosureMatch<'a> {
    pub score: f64,
    pub closure: &'a ClosureRecord,
}

/// Signal types derivable from the current findings: `logs` when any
/// finding has a message, `traces` when any has a trace id.
fn derived_signals(findings: &[EvidenceItem]) -> BTreeSet<&'static str> {
    let mut signals = BTreeSet::new();
    if findings.iter().any(|f| f.message.is_some()) {
        signals.insert("logs");
    }
    if findings.iter().any(|f| f.trace_id.is_some()) {
        signals.insert("traces");
    }
    signals
}

/// Score one closure against the current investigation.
fn score_closure(
    closure: &ClosureRecord,
    question_kw: &BTreeSet<String>,
    service: Option<&str>,
    finding_messages: &str,
    current_signals: &BTreeSet<&'static str>,
) -> f64 {
    let mut score = 0.0;

    // Keyword overlap (max 0.4): jaccard over question keywords.
    if !question_kw.is_empty() && !closure.question_keywords.is_empty() {
        let intersection = question_kw.intersection(&closure.question_keywords).count();
        let union = question_kw.union(&closure.question_keywords).count().max(1);
        score += intersection as f64 / union as f64 * 0.4;
    }

    // Service match (0.2), case-insensitive.
    if let (Some(current), Some(past)) = (service, closure.service.as_deref()) {
        if current.eq_ignore_ascii_case(past) {
            score += 0.2;
        }
    }

    // Root cause appears in current findings (0.3): any of the first 5
    // words longer than 3 chars found in the finding messages.
    let root_cause = closure.root_cause.to_lowercase();
    if root_cause
        .split_whitespace()
        .take(5)
        .any(|w| w.len() > 3 && finding_messages.contains(w))
    {
        score += 0.3;
    }

    // Signal-type overlap (0.1).
    if !closure.signals_used.is_empty()
        && !current_signals.is_empty()
        && closure
            .signals_used
            .iter()
            .any(|s| current_signals.contains(s.as_str()))
    {
        score += 0.1;
    }

    score.min(1.0)
}

/// Best-scoring stored closure, first encountered on ties. `None` when
/// nothing scores above zero.
pub fn best_match<'a>(
    question: &str,
    service: Option<&str>,
    findings: &[EvidenceItem],
    closures: &'a [ClosureRecord],
) -> Option<ClosureMatch<'a>> {
    if closures.is_empty() {
        return None;
    }

    let question_kw = extract_keywords(question);
    let finding_messages = findings
        .iter()
        .take(10)
        .map(|f| {
            f.message
                .as_deref()
                .unwrap_or("")
                .chars()
                .take(100)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let current_signals = derived_signals(findings);

    let mut best: Option<ClosureMatch<'a>> = None;
    for closure in closures {
        let score = score_closure(
            closure,
            &question_kw,
            service,
            &finding_messages,
            &current_signals,
        );
        let beats = best.as_ref().map(|b| score > b.score).unwrap_or(score > 0.0);
        if beats {
            best = Some(ClosureMatch { score, closure });
        }
    }
    best
}
