//! Reconciliation — folds interview outcomes back into the original score.

use std::collections::HashSet;

use super::requirement::Requirement;
use super::scoring::{score, SatisfactionMap};

/// Final verdict after the interview pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledResult {
    pub score: f64,
    pub discarded: bool,
    pub matching: Vec<String>,
}

/// Merges CV-derived and interview-derived satisfaction and re-runs the
/// group-aware scorer. A requirement counts as satisfied iff its text is in
/// either input set, so both passes share one OR/AND semantics.
pub fn reconcile(
    requirements: &[Requirement],
    initial_matching: &[String],
    additional_fulfilled: &[String],
) -> ReconciledResult {
    let all_satisfied: HashSet<&str> = initial_matching
        .iter()
        .chain(additional_fulfilled.iter())
        .map(String::as_str)
        .collect();

    let satisfaction: SatisfactionMap = requirements
        .iter()
        .map(|req| (req.id, all_satisfied.contains(req.text.as_str())))
        .collect();

    let evaluation = score(requirements, &satisfaction);
    ReconciledResult {
        score: evaluation.score,
        discarded: evaluation.discarded,
        matching: evaluation.matching,
    }
}
