//! CV evaluation pass — oracle verdicts in, scored result out.
//!
//! The oracle addresses requirements by text; this module maps its verdicts
//! onto requirement ids, fail-closed for anything the oracle did not return.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::oracle::Oracle;

use super::requirement::Requirement;
use super::scoring::{score, EvaluationResult, SatisfactionMap};

/// Extracts and validates the requirement list from a job posting.
/// Zero usable requirements is a terminal condition for the pipeline.
pub async fn parse_job_posting(
    oracle: &dyn Oracle,
    job_text: &str,
) -> Result<Vec<Requirement>, AppError> {
    let extracted = oracle.extract_requirements(job_text).await?;
    let requirements = Requirement::from_extracted(extracted);
    if requirements.is_empty() {
        return Err(AppError::EmptyPosting);
    }
    info!("Parsed {} requirements from the posting", requirements.len());
    Ok(requirements)
}

/// Scores the CV against the requirements (pass 1).
pub async fn evaluate_cv(
    oracle: &dyn Oracle,
    requirements: &[Requirement],
    cv_text: &str,
) -> Result<EvaluationResult, AppError> {
    // One verdict per distinct text; duplicates share it.
    let mut seen = HashSet::new();
    let texts: Vec<String> = requirements
        .iter()
        .filter(|req| seen.insert(req.text.as_str()))
        .map(|req| req.text.clone())
        .collect();

    let verdicts = oracle.match_against_cv(&texts, cv_text).await?;

    let satisfaction: SatisfactionMap = requirements
        .iter()
        .map(|req| {
            let satisfied = match verdicts.get(&req.text) {
                Some(&verdict) => verdict,
                None => {
                    warn!(
                        "No CV verdict for '{}'; treating as unsatisfied",
                        req.text
                    );
                    false
                }
            };
            (req.id, satisfied)
        })
        .collect();

    let result = score(requirements, &satisfaction);
    info!(
        "CV pass: score={:.2} discarded={} ({} matching, {} unmatching, {} not found)",
        result.score,
        result.discarded,
        result.matching.len(),
        result.unmatching.len(),
        result.not_found.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::StubOracle;
    use crate::oracle::ExtractedRequirement;
    use crate::screening::requirement::RequirementKind;

    fn extracted(text: &str, kind: RequirementKind) -> ExtractedRequirement {
        ExtractedRequirement {
            text: text.to_string(),
            kind,
            group: None,
            combinator: None,
        }
    }

    #[tokio::test]
    async fn test_parse_job_posting_assigns_ids() {
        let oracle = StubOracle {
            extracted: vec![
                extracted("Python", RequirementKind::Mandatory),
                extracted("FastAPI", RequirementKind::Optional),
            ],
            ..StubOracle::default()
        };

        let requirements = parse_job_posting(&oracle, "posting").await.unwrap();
        assert_eq!(requirements.len(), 2);
        assert_ne!(requirements[0].id, requirements[1].id);
    }

    #[tokio::test]
    async fn test_parse_job_posting_empty_extraction_is_terminal() {
        let oracle = StubOracle::default();

        let err = parse_job_posting(&oracle, "posting").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyPosting));
    }

    #[tokio::test]
    async fn test_evaluate_cv_fail_closed_on_missing_verdict() {
        let oracle = StubOracle {
            extracted: vec![
                extracted("Python", RequirementKind::Mandatory),
                extracted("FastAPI", RequirementKind::Optional),
            ],
            cv_verdicts: [("Python".to_string(), true)].into_iter().collect(),
            ..StubOracle::default()
        };

        let requirements = parse_job_posting(&oracle, "posting").await.unwrap();
        let result = evaluate_cv(&oracle, &requirements, "cv").await.unwrap();

        // FastAPI got no verdict: unsatisfied, so it lands in not_found.
        assert_eq!(result.score, 50.0);
        assert!(!result.discarded);
        assert_eq!(result.matching, vec!["Python"]);
        assert_eq!(result.not_found, vec!["FastAPI"]);
    }
}
