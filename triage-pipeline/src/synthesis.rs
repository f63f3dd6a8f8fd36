//! Root-cause synthesis and remediation proposals: LLM-backed with
//! rule-based fallbacks. Candidate order: LLM summary, then root causes
//! copied from top similar incidents, then a deployment fallback.

use tracing::info;

use triage_core::config::LlmConfig;
use triage_core::models::{EvidenceItem, Incident, Remediation, RiskLevel};
use triage_llm::{sanitize_question, ProviderChain};

const ROOT_CAUSE_SYSTEM: &str = "You are an SRE. Be concise and evidence-based.";
const REMEDIATION_SYSTEM: &str =
    "You are an SRE suggesting safe, actionable remediations. Be concise.";

pub(crate) struct Synthesizer<'a> {
    llm: &'a ProviderChain,
    config: &'a LlmConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(llm: &'a ProviderChain, config: &'a LlmConfig) -> Self {
        Self { llm, config }
    }

    /// Ordered candidate texts. The LLM summary is best-effort; its
    /// absence is not an error.
    pub async fn root_cause_candidates(
        &self,
        question: &str,
        findings: &[EvidenceItem],
        incidents: &[Incident],
        changes_present: bool,
    ) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();

        let findings_text = findings_text(findings);
        let incidents_text = incidents
            .iter()
            .take(5)
            .map(|i| {
                format!(
                    "Incident: {}; fix: {}",
                    i.root_cause.as_deref().unwrap_or("unknown"),
                    i.fix_steps.as_deref().unwrap_or("unknown")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let safe_question = sanitize_question(question, 300);
        let prompt = format!(
            "Given this observability question and the following findings and similar past \
             incidents, write a single short paragraph (2-4 sentences) summarizing the most \
             likely root cause. Be specific and cite signals (e.g. logs, traces, deploy). \
             If evidence is insufficient, say so briefly.\n\n\
             Question: {safe_question}\n\n\
             Findings (logs/traces/metrics):\n{findings_text}\n\n\
             Similar past incidents:\n{incidents_text}\n"
        );

        if let Some(summary) = self
            .llm
            .complete(&prompt, Some(ROOT_CAUSE_SYSTEM), self.config.root_cause_max_tokens)
            .await
        {
            let summary = summary.trim().to_string();
            if !summary.is_empty() {
                candidates.push(summary);
            }
        }

        for incident in incidents.iter().take(3) {
            if let Some(root_cause) = incident.root_cause.as_deref() {
                if !root_cause.is_empty()
                    && !candidates.iter().any(|c| c.contains(root_cause))
                {
                    candidates.push(truncate(root_cause, 200).to_string());
                }
            }
        }

        if candidates.is_empty() && changes_present {
            candidates.push("Recent deployment or config change".to_string());
        }

        candidates
    }

    /// Up to three remediation proposals. The LLM path parses
    /// `<action> (risk: <level>)` lines; anything unparseable falls back
    /// to rule-based suggestions.
    pub async fn propose_remediations(
        &self,
        findings: &[EvidenceItem],
        incidents: &[Incident],
    ) -> Vec<Remediation> {
        let findings_text = findings_text(findings);
        let incidents_text = incidents
            .iter()
            .take(5)
            .map(|i| {
                format!(
                    "Incident: {}; root_cause: {}; fix_steps: {}",
                    i.title.as_deref().unwrap_or(&i.incident_id),
                    i.root_cause.as_deref().unwrap_or("unknown"),
                    i.fix_steps.as_deref().unwrap_or("unknown")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Based on these observability findings and similar past incidents, suggest exactly \
             3 remediation actions.\n\
             For each action give one line and a risk level (low/medium/high). Format:\n\
             1. <action> (risk: <level>)\n\
             2. <action> (risk: <level>)\n\
             3. <action> (risk: <level>)\n\n\
             Findings:\n{findings_text}\n\n\
             Similar incidents:\n{incidents_text}\n"
        );

        if let Some(output) = self
            .llm
            .complete(
                &prompt,
                Some(REMEDIATION_SYSTEM),
                self.config.remediation_max_tokens,
            )
            .await
        {
            let parsed = parse_remediations(&output);
            if !parsed.is_empty() {
                return parsed;
            }
        }

        info!("LLM unavailable for remediation, using rule-based fallback");
        rule_based_remediations(findings)
    }
}

fn findings_text(findings: &[EvidenceItem]) -> String {
    findings
        .iter()
        .take(20)
        .map(|f| truncate(f.message.as_deref().unwrap_or("(no message)"), 200).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `<action> (risk: <level>)` lines; unmarked lines default to
/// medium risk.
fn parse_remediations(output: &str) -> Vec<Remediation> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .map(|line| {
            let lowered = line.to_lowercase();
            if let Some(idx) = lowered.rfind("(risk:") {
                let action = line[..idx]
                    .trim()
                    .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                    .trim()
                    .to_string();
                let risk_text = line[idx + "(risk:".len()..].trim().trim_end_matches(')');
                Remediation {
                    action,
                    risk: RiskLevel::parse_lenient(risk_text),
                }
            } else {
                Remediation {
                    action: line.to_string(),
                    risk: RiskLevel::Medium,
                }
            }
        })
        .filter(|r| !r.action.is_empty())
        .collect()
}

/// Deploy evidence suggests a rollback; otherwise generic hygiene.
fn rule_based_remediations(findings: &[EvidenceItem]) -> Vec<Remediation> {
    let has_deploy = findings.iter().any(|f| {
        f.message
            .as_deref()
            .map(|m| m.to_lowercase().contains("deploy"))
            .unwrap_or(false)
    });

    let suggestions: &[&str] = if has_deploy {
        &["Consider rollback of last deployment"]
    } else {
        &[
            "Review recent changes",
            "Check dependency health",
            "Scale up if resource-bound",
        ]
    };

    suggestions
        .iter()
        .take(3)
        .map(|s| Remediation {
            action: s.to_string(),
            risk: RiskLevel::Medium,
        })
        .collect()
}

pub(crate) fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use triage_core::models::SourceKind;

    use super::*;

    fn finding(message: &str) -> EvidenceItem {
        EvidenceItem {
            timestamp: None,
            message: Some(message.into()),
            service: None,
            trace_id: None,
            source: SourceKind::Log,
            links: vec![],
        }
    }

    #[test]
    fn parses_risk_annotated_lines() {
        let parsed = parse_remediations(
            "1. Roll back build 1.2.3 (risk: low)\n2. Restart the pool (risk: HIGH)\n3. Watch dashboards",
        );
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].action, "Roll back build 1.2.3");
        assert_eq!(parsed[0].risk, RiskLevel::Low);
        assert_eq!(parsed[1].risk, RiskLevel::High);
        assert_eq!(parsed[2].risk, RiskLevel::Medium);
    }

    #[test]
    fn rule_based_prefers_rollback_on_deploy_evidence() {
        let remediations = rule_based_remediations(&[finding("Deployed build 9 to prod")]);
        assert_eq!(remediations.len(), 1);
        assert!(remediations[0].action.contains("rollback"));
    }

    #[test]
    fn rule_based_generic_without_deploys() {
        let remediations = rule_based_remediations(&[finding("timeout talking to redis")]);
        assert_eq!(remediations.len(), 3);
    }
}
