//! Oracle — the typed boundary to the external reasoning model.
//!
//! The core never interprets free text itself: requirement extraction, CV
//! matching, answer interpretation, and summarization are all delegated to
//! an `Oracle` implementation injected at startup. Tests substitute a
//! deterministic stub.

pub mod prompts;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::interview::state::HistoryEntry;
use crate::llm_client::{LlmClient, LlmError};
use crate::screening::requirement::{Combinator, RequirementKind};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed oracle output: {0}")]
    Malformed(String),
}

/// Wire DTO for one extracted requirement, before ids are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRequirement {
    pub text: String,
    pub kind: RequirementKind,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub combinator: Option<Combinator>,
}

#[derive(Debug, Deserialize)]
struct ExtractionResponse {
    requirements: Vec<ExtractedRequirement>,
}

/// One per-requirement verdict from the CV matching call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvVerdict {
    pub requirement: String,
    pub satisfied: bool,
    pub rationale: String,
}

#[derive(Debug, Deserialize)]
struct CvMatchResponse {
    verdicts: Vec<CvVerdict>,
}

/// The model's reading of one candidate answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerJudgment {
    pub satisfied: bool,
    pub rationale: String,
}

/// The reasoning capabilities the pipeline depends on. Everything else in
/// the system is deterministic.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Extracts the ordered list of atomic requirements from a job posting.
    /// An empty list means "no requirements found", not an error.
    async fn extract_requirements(
        &self,
        job_text: &str,
    ) -> Result<Vec<ExtractedRequirement>, OracleError>;

    /// Judges every requirement text against the CV in one call.
    /// Returns one entry per distinct input text; callers fail closed on
    /// anything missing.
    async fn match_against_cv(
        &self,
        requirement_texts: &[String],
        cv_text: &str,
    ) -> Result<HashMap<String, bool>, OracleError>;

    /// Decides whether a free-text answer shows the requirement is met.
    async fn interpret_answer(
        &self,
        requirement_text: &str,
        candidate_answer: &str,
    ) -> Result<AnswerJudgment, OracleError>;

    /// Folds the previous summary and the recent history window into an
    /// updated rolling summary.
    async fn summarize(
        &self,
        previous_summary: &str,
        recent_history: &[HistoryEntry],
    ) -> Result<String, OracleError>;
}

/// Production oracle backed by the LLM client.
pub struct LlmOracle {
    llm: LlmClient,
}

impl LlmOracle {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Oracle for LlmOracle {
    async fn extract_requirements(
        &self,
        job_text: &str,
    ) -> Result<Vec<ExtractedRequirement>, OracleError> {
        let prompt = prompts::EXTRACT_PROMPT_TEMPLATE.replace("{job_text}", job_text);
        let response: ExtractionResponse =
            self.llm.call_json(&prompt, prompts::EXTRACT_SYSTEM).await?;
        debug!("Extracted {} requirements", response.requirements.len());
        Ok(response.requirements)
    }

    async fn match_against_cv(
        &self,
        requirement_texts: &[String],
        cv_text: &str,
    ) -> Result<HashMap<String, bool>, OracleError> {
        let listed = requirement_texts
            .iter()
            .map(|text| format!("- {text}"))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = prompts::CV_MATCH_PROMPT_TEMPLATE
            .replace("{requirements}", &listed)
            .replace("{cv_text}", cv_text);
        let response: CvMatchResponse =
            self.llm.call_json(&prompt, prompts::CV_MATCH_SYSTEM).await?;
        for verdict in &response.verdicts {
            debug!(
                "CV verdict for '{}': satisfied={} ({})",
                verdict.requirement, verdict.satisfied, verdict.rationale
            );
        }
        Ok(response
            .verdicts
            .into_iter()
            .map(|verdict| (verdict.requirement, verdict.satisfied))
            .collect())
    }

    async fn interpret_answer(
        &self,
        requirement_text: &str,
        candidate_answer: &str,
    ) -> Result<AnswerJudgment, OracleError> {
        let prompt = prompts::INTERPRET_PROMPT_TEMPLATE
            .replace("{requirement}", requirement_text)
            .replace("{answer}", candidate_answer);
        Ok(self
            .llm
            .call_json(&prompt, prompts::INTERPRET_SYSTEM)
            .await?)
    }

    async fn summarize(
        &self,
        previous_summary: &str,
        recent_history: &[HistoryEntry],
    ) -> Result<String, OracleError> {
        let history_text = recent_history
            .iter()
            .map(|entry| format!("{}: {}", entry.speaker.label(), entry.text))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = prompts::SUMMARIZE_PROMPT_TEMPLATE
            .replace("{previous_summary}", previous_summary)
            .replace("{history}", &history_text);

        let reply = self.llm.call(&prompt, prompts::SUMMARIZE_SYSTEM).await?;
        let summary = reply.trim();
        if summary.is_empty() {
            return Err(OracleError::Malformed(
                "summarizer returned empty text".to_string(),
            ));
        }
        Ok(summary.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_requirement_defaults_group_and_combinator() {
        let json = r#"{"text": "Python experience", "kind": "mandatory"}"#;
        let parsed: ExtractedRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text, "Python experience");
        assert_eq!(parsed.kind, RequirementKind::Mandatory);
        assert!(parsed.group.is_none());
        assert!(parsed.combinator.is_none());
    }

    #[test]
    fn test_extraction_response_full_deserializes_correctly() {
        let json = r#"{
            "requirements": [
                {"text": "CS degree", "kind": "mandatory", "group": "minimum_education", "combinator": "OR"},
                {"text": "AI master", "kind": "mandatory", "group": "minimum_education", "combinator": "OR"},
                {"text": "FastAPI knowledge", "kind": "optional", "group": null, "combinator": null}
            ]
        }"#;
        let parsed: ExtractionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.requirements.len(), 3);
        assert_eq!(parsed.requirements[0].group.as_deref(), Some("minimum_education"));
        assert_eq!(parsed.requirements[0].combinator, Some(Combinator::Or));
        assert_eq!(parsed.requirements[2].kind, RequirementKind::Optional);
    }

    #[test]
    fn test_cv_match_response_deserializes() {
        let json = r#"{
            "verdicts": [
                {"requirement": "Python experience", "satisfied": true, "rationale": "Django backend work"},
                {"requirement": "Kubernetes", "satisfied": false, "rationale": "no evidence"}
            ]
        }"#;
        let parsed: CvMatchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.verdicts.len(), 2);
        assert!(parsed.verdicts[0].satisfied);
        assert!(!parsed.verdicts[1].satisfied);
    }

    #[test]
    fn test_answer_judgment_deserializes() {
        let json = r#"{"satisfied": false, "rationale": "the answer was a plain no"}"#;
        let parsed: AnswerJudgment = serde_json::from_str(json).unwrap();
        assert!(!parsed.satisfied);
        assert!(!parsed.rationale.is_empty());
    }
}
