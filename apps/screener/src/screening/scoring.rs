//! Scoring engine — aggregates per-requirement satisfaction into group
//! verdicts, then into the discard decision and the numeric score.
//!
//! Pure and total: no oracle access, no error paths, division guarded.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::requirement::{Combinator, Requirement, RequirementId, RequirementKind};

/// Per-requirement satisfaction for one evaluation pass, keyed by id.
/// A missing entry reads as unsatisfied.
pub type SatisfactionMap = HashMap<RequirementId, bool>;

/// Outcome of one scoring pass. The three text lists are routed by the
/// group-level verdict, not per requirement: every member of a satisfied
/// OR-group lands in `matching`, including the alternatives that were false.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationResult {
    /// 0–100, two decimals. Always 0.0 when `discarded`.
    pub score: f64,
    pub discarded: bool,
    pub matching: Vec<String>,
    pub unmatching: Vec<String>,
    pub not_found: Vec<String>,
}

struct Group<'a> {
    kind: RequirementKind,
    combinator: Combinator,
    members: Vec<&'a Requirement>,
}

/// Partitions requirements into their logical groups, preserving
/// first-appearance order. Ungrouped requirements become singleton
/// AND-groups. The first member fixes a group's kind and combinator;
/// disagreeing later members are kept but logged.
fn partition(requirements: &[Requirement]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for req in requirements {
        match req.group.as_deref() {
            None => groups.push(Group {
                kind: req.kind,
                combinator: Combinator::And,
                members: vec![req],
            }),
            Some(group_id) => {
                if let Some(&at) = index.get(group_id) {
                    let group = &mut groups[at];
                    if req.kind != group.kind {
                        warn!(
                            "Requirement '{}' disagrees with its group's kind; keeping {:?}",
                            req.text, group.kind
                        );
                    }
                    if let Some(combinator) = req.combinator {
                        if combinator != group.combinator {
                            warn!(
                                "Requirement '{}' disagrees with its group's combinator; keeping {:?}",
                                req.text, group.combinator
                            );
                        }
                    }
                    group.members.push(req);
                } else {
                    index.insert(group_id, groups.len());
                    groups.push(Group {
                        kind: req.kind,
                        combinator: req.combinator.unwrap_or(Combinator::And),
                        members: vec![req],
                    });
                }
            }
        }
    }

    groups
}

/// Scores a requirement set against one satisfaction map.
///
/// `score = 100 × |distinct matching texts| / |requirements|`, two decimals,
/// forced to 0 when any mandatory group fails. An empty requirement list
/// yields the zero, non-discarded default.
pub fn score(requirements: &[Requirement], satisfaction: &SatisfactionMap) -> EvaluationResult {
    if requirements.is_empty() {
        return EvaluationResult::default();
    }

    let mut result = EvaluationResult::default();
    let is_met = |req: &Requirement| satisfaction.get(&req.id).copied().unwrap_or(false);

    for group in partition(requirements) {
        let group_satisfied = match group.combinator {
            Combinator::Or => group.members.iter().any(|&r| is_met(r)),
            Combinator::And => group.members.iter().all(|&r| is_met(r)),
        };

        let bucket = if group_satisfied {
            &mut result.matching
        } else if group.kind == RequirementKind::Mandatory {
            result.discarded = true;
            &mut result.unmatching
        } else {
            &mut result.not_found
        };
        for req in &group.members {
            bucket.push(req.text.clone());
        }
    }

    result.score = if result.discarded {
        0.0
    } else {
        let distinct_matching = result.matching.iter().collect::<HashSet<_>>().len();
        round2(100.0 * distinct_matching as f64 / requirements.len() as f64)
    };

    result
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::requirement::RequirementId;

    fn req(text: &str, kind: RequirementKind) -> Requirement {
        Requirement {
            id: RequirementId::new(),
            text: text.to_string(),
            kind,
            group: None,
            combinator: None,
        }
    }

    fn grouped(text: &str, kind: RequirementKind, group: &str, combinator: Combinator) -> Requirement {
        Requirement {
            id: RequirementId::new(),
            text: text.to_string(),
            kind,
            group: Some(group.to_string()),
            combinator: Some(combinator),
        }
    }

    fn satisfaction(pairs: &[(&Requirement, bool)]) -> SatisfactionMap {
        pairs.iter().map(|&(r, v)| (r.id, v)).collect()
    }

    #[test]
    fn test_mandatory_met_optional_unmet_scores_fifty() {
        let python = req("Python", RequirementKind::Mandatory);
        let fastapi = req("FastAPI", RequirementKind::Optional);
        let sat = satisfaction(&[(&python, true), (&fastapi, false)]);

        let result = score(&[python, fastapi], &sat);
        assert_eq!(result.score, 50.0);
        assert!(!result.discarded);
        assert_eq!(result.matching, vec!["Python"]);
        assert!(result.unmatching.is_empty());
        assert_eq!(result.not_found, vec!["FastAPI"]);
    }

    #[test]
    fn test_or_group_one_alternative_met_matches_all_members() {
        let degree = grouped("CS degree", RequirementKind::Mandatory, "education", Combinator::Or);
        let master = grouped("AI master", RequirementKind::Mandatory, "education", Combinator::Or);
        let sat = satisfaction(&[(&degree, false), (&master, true)]);

        let result = score(&[degree, master], &sat);
        assert!(!result.discarded);
        assert_eq!(result.matching, vec!["CS degree", "AI master"]);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_failed_mandatory_discards_regardless_of_other_satisfactions() {
        let python = req("Python", RequirementKind::Mandatory);
        let docker = req("Docker", RequirementKind::Mandatory);
        let sat = satisfaction(&[(&python, true), (&docker, false)]);

        let result = score(&[python, docker], &sat);
        assert!(result.discarded);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.unmatching, vec!["Docker"]);
    }

    #[test]
    fn test_failed_and_group_optional_lands_in_not_found() {
        let kafka = grouped("Kafka", RequirementKind::Optional, "streaming", Combinator::And);
        let flink = grouped("Flink", RequirementKind::Optional, "streaming", Combinator::And);
        let sat = satisfaction(&[(&kafka, true), (&flink, false)]);

        let result = score(&[kafka, flink], &sat);
        assert!(!result.discarded);
        assert_eq!(result.not_found, vec!["Kafka", "Flink"]);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_missing_satisfaction_entry_is_fail_closed() {
        let python = req("Python", RequirementKind::Mandatory);
        let sat = SatisfactionMap::new();

        let result = score(std::slice::from_ref(&python), &sat);
        assert!(result.discarded);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_empty_requirements_yield_default() {
        let result = score(&[], &SatisfactionMap::new());
        assert_eq!(result, EvaluationResult::default());
        assert!(!result.discarded);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_all_optional_unsatisfied_scores_zero_without_discard() {
        let fastapi = req("FastAPI", RequirementKind::Optional);
        let langchain = req("LangChain", RequirementKind::Optional);
        let sat = satisfaction(&[(&fastapi, false), (&langchain, false)]);

        let result = score(&[fastapi, langchain], &sat);
        assert_eq!(result.score, 0.0);
        assert!(!result.discarded);
    }

    #[test]
    fn test_score_is_monotone_in_added_satisfactions() {
        let a = req("A", RequirementKind::Optional);
        let b = req("B", RequirementKind::Optional);
        let requirements = vec![a.clone(), b.clone()];

        let none = score(&requirements, &satisfaction(&[(&a, false), (&b, false)]));
        let one = score(&requirements, &satisfaction(&[(&a, true), (&b, false)]));
        let both = score(&requirements, &satisfaction(&[(&a, true), (&b, true)]));

        assert!(none.score <= one.score);
        assert!(one.score <= both.score);
        assert_eq!(both.score, 100.0);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let a = req("A", RequirementKind::Optional);
        let b = req("B", RequirementKind::Optional);
        let c = req("C", RequirementKind::Optional);
        let sat = satisfaction(&[(&a, true), (&b, false), (&c, false)]);

        let result = score(&[a, b, c], &sat);
        assert_eq!(result.score, 33.33);
    }

    #[test]
    fn test_duplicate_texts_stay_distinct_by_id() {
        // Two requirements with identical wording: one satisfied, one not.
        // Ids keep them apart; the distinct-text numerator collapses them.
        let first = req("Python", RequirementKind::Optional);
        let second = req("Python", RequirementKind::Optional);
        let sat = satisfaction(&[(&first, true), (&second, false)]);

        let result = score(&[first, second], &sat);
        assert_eq!(result.matching, vec!["Python"]);
        assert_eq!(result.not_found, vec!["Python"]);
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_score_is_idempotent() {
        let python = req("Python", RequirementKind::Mandatory);
        let fastapi = req("FastAPI", RequirementKind::Optional);
        let sat = satisfaction(&[(&python, true), (&fastapi, false)]);
        let requirements = vec![python, fastapi];

        let first = score(&requirements, &sat);
        let second = score(&requirements, &sat);
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_combinator_defaults_to_and_when_unspecified() {
        let mut a = grouped("A", RequirementKind::Mandatory, "g", Combinator::And);
        a.combinator = None;
        let b = grouped("B", RequirementKind::Mandatory, "g", Combinator::And);
        let sat = satisfaction(&[(&a, true), (&b, false)]);

        let result = score(&[a, b], &sat);
        assert!(result.discarded);
    }
}
