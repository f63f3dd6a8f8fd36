use serde::{Deserialize, Serialize};

/// Risk classification of a proposed remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lenient parse used on LLM output; anything unrecognized is medium.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

/// A proposed remediation action. Proposals are advisory; the core never
/// executes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remediation {
    pub action: String,
    pub risk: RiskLevel,
}

impl Remediation {
    pub fn low_risk(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            risk: RiskLevel::Low,
        }
    }
}
