//! Attempt tracking per scope fingerprint: evolving messages across
//! repeated runs of the same logical investigation, plus run deltas.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use chrono::Utc;

use triage_core::models::{AttemptRecord, RunDelta};

/// Stable hash of the normalized question + service + env. Identifies a
/// logical investigation across repeated attempts.
pub fn scope_fingerprint(question: &str, service: Option<&str>, env: Option<&str>) -> String {
    let key = format!(
        "{}|{}|{}",
        question.trim().to_lowercase(),
        service.unwrap_or("").to_lowercase(),
        env.unwrap_or("").to_lowercase()
    );
    let hash = blake3::hash(key.as_bytes()).to_hex();
    hash.as_str()[..16].to_string()
}

/// What the tracker derived for the current attempt.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub attempt_number: u32,
    pub message: String,
    /// Present from the second attempt onward.
    pub delta: Option<RunDelta>,
}

/// History of attempts keyed by scope fingerprint. Owned by the
/// orchestrator and shared across concurrent investigations.
///
/// Fingerprints are never evicted; `scopes()` is exposed so an owner
/// can watch growth in a long-lived process.
#[derive(Default)]
pub struct AttemptTracker {
    history: Mutex<HashMap<String, Vec<AttemptRecord>>>,
}

impl AttemptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct scope fingerprints tracked.
    pub fn scopes(&self) -> usize {
        self.lock().len()
    }

    /// Attempts recorded for a fingerprint.
    pub fn attempts_for(&self, fingerprint: &str) -> Vec<AttemptRecord> {
        self.lock().get(fingerprint).cloned().unwrap_or_default()
    }

    /// Record the current attempt and derive its number, the evolving
    /// attempt message, and the delta versus the preceding attempt.
    pub fn record(
        &self,
        fingerprint: &str,
        confidence: f64,
        missing_signals: &[String],
        signals: &BTreeMap<String, usize>,
        root_cause_found: bool,
    ) -> AttemptOutcome {
        let mut history = self.lock();
        let attempts = history.entry(fingerprint.to_string()).or_default();

        let attempt_number = attempts.len() as u32 + 1;
        let previous = attempts.last();

        let message = build_message(attempt_number, previous, missing_signals, confidence);
        let delta = previous.map(|prev| RunDelta {
            signals_added: signals.values().sum::<usize>() as i64
                - prev.signals.values().sum::<usize>() as i64,
            confidence_delta: confidence - prev.confidence,
            missing_resolved: prev
                .missing_signals
                .iter()
                .filter(|s| !missing_signals.contains(s))
                .cloned()
                .collect(),
            root_cause_changed: root_cause_found,
        });

        attempts.push(AttemptRecord {
            fingerprint: fingerprint.to_string(),
            attempt: attempt_number,
            confidence,
            missing_signals: missing_signals.to_vec(),
            signals: signals.clone(),
            recorded_at: Utc::now(),
        });

        AttemptOutcome {
            attempt_number,
            message,
            delta,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<AttemptRecord>>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn build_message(
    attempt_number: u32,
    previous: Option<&AttemptRecord>,
    missing_signals: &[String],
    confidence: f64,
) -> String {
    let Some(prev) = previous else {
        return if missing_signals.is_empty() {
            "First analysis. All signal sources responding.".to_string()
        } else {
            format!("First analysis. Missing: {}.", missing_signals.join(", "))
        };
    };

    let prev_missing: BTreeSet<&str> = prev.missing_signals.iter().map(String::as_str).collect();
    let now_missing: BTreeSet<&str> = missing_signals.iter().map(String::as_str).collect();
    let gained: Vec<&str> = prev_missing.difference(&now_missing).copied().collect();

    let mut parts: Vec<String> = Vec::new();
    if !gained.is_empty() {
        parts.push(format!("Gained: {}", gained.join(", ")));
    }
    if !now_missing.is_empty() {
        parts.push(format!(
            "Still missing: {}",
            now_missing.iter().copied().collect::<Vec<_>>().join(", ")
        ));
    }
    let conf_delta = confidence - prev.confidence;
    if conf_delta.abs() > 0.01 {
        let arrow = if conf_delta > 0.0 { "↑" } else { "↓" };
        parts.push(format!("Confidence {arrow} {:.0}%", conf_delta.abs() * 100.0));
    }

    if attempt_number >= 3 && !now_missing.is_empty() && confidence < 0.3 {
        format!(
            "Attempt {attempt_number}. {}. Auto-widening scope recommended.",
            parts.join(". ")
        )
    } else if parts.is_empty() {
        format!("Attempt {attempt_number}.")
    } else {
        format!("Attempt {attempt_number}. {}.", parts.join(". "))
    }
}
