//! Requirement model — the atomic unit everything downstream scores over.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::oracle::ExtractedRequirement;

/// Whether failing the requirement disqualifies the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Mandatory,
    Optional,
}

/// How requirements sharing a group id combine into one verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
}

/// Stable generated identity. Two requirements with identical wording stay
/// distinct inside the core; only the oracle boundary addresses them by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequirementId(Uuid);

impl RequirementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequirementId {
    fn default() -> Self {
        Self::new()
    }
}

/// One atomic requirement extracted from the job posting.
/// Created once at ingestion; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub text: String,
    pub kind: RequirementKind,
    /// Logical-group membership. `None` means a singleton AND-group.
    pub group: Option<String>,
    pub combinator: Option<Combinator>,
}

impl Requirement {
    /// Ingests the oracle's extraction output: assigns fresh ids and drops
    /// entries with empty text.
    pub fn from_extracted(extracted: Vec<ExtractedRequirement>) -> Vec<Requirement> {
        extracted
            .into_iter()
            .filter_map(|entry| {
                let text = entry.text.trim().to_string();
                if text.is_empty() {
                    warn!("Dropping extracted requirement with empty text");
                    return None;
                }
                Some(Requirement {
                    id: RequirementId::new(),
                    text,
                    kind: entry.kind,
                    group: entry.group,
                    combinator: entry.combinator,
                })
            })
            .collect()
    }
}
