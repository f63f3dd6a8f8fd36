use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Learnings captured when an investigation is closed.
///
/// Appended once, never mutated. Retained in a bounded ring buffer and
/// optionally mirrored to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureRecord {
    pub run_id: String,
    pub root_cause: String,
    pub signals_used: BTreeSet<String>,
    pub false_leads: BTreeSet<String>,
    pub resolution_seconds: f64,
    pub service: Option<String>,
    pub env: Option<String>,
    /// Keywords extracted from the closing question, used for fuzzy
    /// matching against future investigations.
    pub question_keywords: BTreeSet<String>,
    pub recorded_at: DateTime<Utc>,
}
