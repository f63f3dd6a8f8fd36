//! Keyword extraction for closure matching.

use std::collections::BTreeSet;

/// Filler words that carry no matching signal.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "in", "on", "at", "to", "for", "of", "with",
    "by", "from", "what", "why", "how", "when", "where", "which",
];

/// Lower-cased tokens longer than 2 characters, trailing punctuation
/// stripped, minus stop words.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .filter(|w| w.len() > 2)
        .map(|w| {
            w.to_lowercase()
                .trim_end_matches(['?', '.', ',', '!', ';', ':'])
                .to_string()
        })
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}
