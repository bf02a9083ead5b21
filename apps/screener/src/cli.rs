//! Terminal surface: free-text entry, progress echo, final report.
//!
//! Everything user-visible lives here; the screening and interview modules
//! never print.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use crate::errors::AppError;
use crate::interview::channel::CandidateChannel;
use crate::interview::machine::{InterviewOutcome, InterviewSession};
use crate::oracle::Oracle;
use crate::screening::evaluate::{evaluate_cv, parse_job_posting};
use crate::screening::reconcile::reconcile;
use crate::screening::requirement::RequirementKind;
use crate::screening::scoring::EvaluationResult;

/// Reads free-text lines until the first blank line (or EOF).
fn read_block(reader: &mut impl BufRead) -> Result<String, AppError> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 || line.trim().is_empty() {
            break;
        }
        lines.push(line.trim_end().to_string());
    }
    Ok(lines.join("\n"))
}

/// Removes duplicate texts, keeping first occurrences in order.
fn dedup_preserving_order(texts: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    texts
        .iter()
        .filter(|text| seen.insert(text.as_str()))
        .cloned()
        .collect()
}

/// Candidate channel backed by stdin/stdout.
pub struct TerminalChannel;

impl CandidateChannel for TerminalChannel {
    fn deliver(&mut self, line: &str) -> Result<(), AppError> {
        println!("{line}");
        Ok(())
    }

    fn collect(&mut self) -> Result<String, AppError> {
        print!("Your answer: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

fn kind_label(kind: RequirementKind) -> &'static str {
    match kind {
        RequirementKind::Mandatory => "mandatory",
        RequirementKind::Optional => "optional",
    }
}

fn print_pass(result: &EvaluationResult) {
    println!("  score: {:.2}%  discarded: {}", result.score, result.discarded);
    println!("  matching: {:?}", result.matching);
    println!("  unmatching: {:?}", result.unmatching);
    println!("  not found: {:?}", result.not_found);
}

/// Runs one full screening session against stdin/stdout.
pub async fn run(oracle: &dyn Oracle) -> Result<(), AppError> {
    println!("=== AI Candidate Screening ===\n");

    println!("Enter the job posting requirements (finish with a blank line):");
    let stdin = io::stdin();
    let job_text = read_block(&mut stdin.lock())?;

    println!("\nEnter the full text of the candidate's CV (finish with a blank line):");
    let cv_text = read_block(&mut stdin.lock())?;

    println!("\nAnalyzing the posting...\n");
    let requirements = parse_job_posting(oracle, &job_text).await?;

    println!("Interpreted requirements:");
    for req in &requirements {
        println!("- [{}] {}", kind_label(req.kind), req.text);
    }

    println!("\nEvaluating the CV against the posting...\n");
    let first_pass = evaluate_cv(oracle, &requirements, &cv_text).await?;

    println!("First-pass result:");
    print_pass(&first_pass);

    if first_pass.discarded {
        println!("\nThe candidate was discarded for missing a mandatory requirement.");
        println!("Final score: {:.2}%", first_pass.score);
        return Ok(());
    }

    let pending = dedup_preserving_order(&first_pass.not_found);
    let outcome = if pending.is_empty() {
        InterviewOutcome {
            fulfilled: Vec::new(),
            summary: String::new(),
        }
    } else {
        println!("\n--- Interview ---\n");
        let mut channel = TerminalChannel;
        let session = InterviewSession::new(oracle, &mut channel, pending, String::new());
        let outcome = session.run().await?;

        println!("\nThanks, your answers have been recorded.\n");
        println!("Context summary:");
        println!("{}\n", outcome.summary);
        outcome
    };

    println!("Recomputing the score with the additional information...\n");
    let final_pass = reconcile(&requirements, &first_pass.matching, &outcome.fulfilled);

    println!("Final result after the interview:");
    println!(
        "  score: {:.2}%  discarded: {}",
        final_pass.score, final_pass.discarded
    );
    println!("  matching: {:?}", final_pass.matching);

    println!("\nFinal score: {:.2}%", final_pass.score);
    if final_pass.discarded {
        println!("The candidate was discarded for missing a mandatory requirement.");
    } else {
        println!("The candidate was NOT discarded.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_block_stops_at_blank_line() {
        let mut input = Cursor::new("first line\nsecond line\n\nignored\n");
        let block = read_block(&mut input).unwrap();
        assert_eq!(block, "first line\nsecond line");
    }

    #[test]
    fn test_read_block_stops_at_eof() {
        let mut input = Cursor::new("only line");
        let block = read_block(&mut input).unwrap();
        assert_eq!(block, "only line");
    }

    #[test]
    fn test_read_block_empty_input() {
        let mut input = Cursor::new("");
        let block = read_block(&mut input).unwrap();
        assert_eq!(block, "");
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let texts = vec![
            "Docker".to_string(),
            "Kafka".to_string(),
            "Docker".to_string(),
            "LangChain".to_string(),
            "Kafka".to_string(),
        ];
        assert_eq!(
            dedup_preserving_order(&texts),
            vec!["Docker", "Kafka", "LangChain"]
        );
    }

    #[test]
    fn test_kind_label() {
        assert_eq!(kind_label(RequirementKind::Mandatory), "mandatory");
        assert_eq!(kind_label(RequirementKind::Optional), "optional");
    }
}
