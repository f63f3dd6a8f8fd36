use serde::{Deserialize, Serialize};

/// A previously resolved incident from the knowledge base, returned by
/// the similar-incident matcher with its vector similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub incident_id: String,
    pub title: Option<String>,
    pub symptom_summary: Option<String>,
    pub root_cause: Option<String>,
    pub fix_steps: Option<String>,
    pub postmortem_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub service: Option<String>,
    pub env: Option<String>,
    pub score: f64,
}
