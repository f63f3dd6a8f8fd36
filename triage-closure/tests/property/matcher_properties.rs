//! Property tests for the closure matcher: the score is a sum of four
//! capped components and always lies in [0, 1].

use std::collections::BTreeSet;

use chrono::Utc;
use proptest::prelude::*;

use triage_closure::best_match;
use triage_core::models::{ClosureRecord, EvidenceItem, SourceKind};

fn record(keywords: Vec<String>, service: Option<String>, root_cause: String) -> ClosureRecord {
    ClosureRecord {
        run_id: "run".into(),
        root_cause,
        signals_used: ["logs".to_string(), "traces".to_string()]
            .into_iter()
            .collect(),
        false_leads: BTreeSet::new(),
        resolution_seconds: 60.0,
        service,
        env: None,
        question_keywords: keywords.into_iter().collect(),
        recorded_at: Utc::now(),
    }
}

fn finding(message: String, with_trace: bool) -> EvidenceItem {
    EvidenceItem {
        timestamp: None,
        message: Some(message),
        service: None,
        trace_id: with_trace.then(|| "t-1".to_string()),
        source: SourceKind::Log,
        links: vec![],
    }
}

proptest! {
    #[test]
    fn match_score_is_always_in_unit_interval(
        question in "[a-z ]{0,60}",
        service in proptest::option::of("[a-z]{3,10}"),
        keywords in prop::collection::vec("[a-z]{3,10}", 0..8),
        root_cause in "[a-z ]{0,40}",
        messages in prop::collection::vec("[a-z ]{0,40}", 0..5),
        with_trace in any::<bool>(),
    ) {
        let closures = vec![record(keywords, service.clone(), root_cause)];
        let findings: Vec<EvidenceItem> = messages
            .into_iter()
            .map(|m| finding(m, with_trace))
            .collect();

        if let Some(m) = best_match(&question, service.as_deref(), &findings, &closures) {
            prop_assert!(m.score > 0.0);
            prop_assert!(m.score <= 1.0);
        }
    }

    #[test]
    fn identical_scope_scores_at_least_as_high_as_disjoint(
        keywords in prop::collection::vec("[a-z]{4,10}", 1..6),
    ) {
        let question = keywords.join(" ");
        let matching = vec![record(keywords.clone(), None, String::new())];
        // Digits cannot appear in extracted keywords, so this never overlaps.
        let disjoint = vec![record(vec!["zz00zz".to_string()], None, String::new())];

        let hit = best_match(&question, None, &[], &matching).map(|m| m.score).unwrap_or(0.0);
        let miss = best_match(&question, None, &[], &disjoint).map(|m| m.score).unwrap_or(0.0);
        prop_assert!(hit >= miss);
    }
}
