//! Gates in front of the remediation proposal: enough evidence, and a
//! citation behind every claim.

use triage_core::constants::MIN_EVIDENCE_FOR_FIX;

/// A root-cause claim with the number of evidence citations backing it.
#[derive(Debug, Clone)]
pub(crate) struct Claim {
    pub statement: String,
    pub citations: usize,
}

fn require_evidence_count(count: usize, min_count: usize) -> Result<(), String> {
    if count < min_count {
        return Err(format!(
            "At least {min_count} evidence items required; got {count}."
        ));
    }
    Ok(())
}

fn require_citations(claims: &[Claim]) -> Result<(), String> {
    for (i, claim) in claims.iter().enumerate() {
        if claim.citations == 0 {
            return Err(format!("Claim {} has no citations.", i + 1));
        }
    }
    Ok(())
}

/// Run all validations before proposing a fix. Failure blocks only the
/// remediation sub-step, never the run.
pub(crate) fn validate_before_propose(
    evidence_count: usize,
    claims: &[Claim],
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if let Err(msg) = require_evidence_count(evidence_count, MIN_EVIDENCE_FOR_FIX) {
        errors.push(msg);
    }
    if let Err(msg) = require_citations(claims) {
        errors.push(msg);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(citations: usize) -> Claim {
        Claim {
            statement: "pool exhaustion".into(),
            citations,
        }
    }

    #[test]
    fn insufficient_evidence_is_rejected() {
        let errors = validate_before_propose(1, &[claim(1)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("At least 2"));
    }

    #[test]
    fn uncited_claims_are_rejected() {
        let errors = validate_before_propose(5, &[claim(1), claim(0)]).unwrap_err();
        assert_eq!(errors, vec!["Claim 2 has no citations.".to_string()]);
    }

    #[test]
    fn cited_claims_with_evidence_pass() {
        assert!(validate_before_propose(2, &[claim(2)]).is_ok());
    }
}
