//! Prompt-injection guard for user-supplied question text.

use tracing::warn;

/// Phrases that mark an attempt to steer the model off its task.
const INJECTION_PATTERNS: &[&str] = &[
    "ignore previous instructions",
    "ignore all instructions",
    "disregard above",
    "system prompt",
    "you are now",
    "act as",
];

/// Strip control characters (keeping newline and tab), truncate to
/// `max_length` characters, and wrap the text in explicit user-query
/// markers when a known injection phrase appears.
pub fn sanitize_question(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(max_length)
        .collect();

    let lowered = cleaned.to_lowercase();
    let wrapped = if let Some(pattern) = INJECTION_PATTERNS.iter().find(|p| lowered.contains(**p)) {
        warn!(pattern, "potential prompt injection detected in input");
        format!("[USER QUERY] {cleaned} [/USER QUERY]")
    } else {
        cleaned
    };

    wrapped.trim().to_string()
}
