//! Candidate I/O seam.

use crate::errors::AppError;

/// Delivers prompts to the candidate and collects free-text answers.
/// The interview loop only talks to the candidate through this trait, so a
/// session runs identically against a terminal or a test script.
pub trait CandidateChannel {
    fn deliver(&mut self, line: &str) -> Result<(), AppError>;

    /// Blocks until the candidate answers one line.
    fn collect(&mut self) -> Result<String, AppError>;
}

/// Replays canned answers in order; records everything delivered.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    answers: std::collections::VecDeque<String>,
    pub delivered: Vec<String>,
}

#[cfg(test)]
impl ScriptedChannel {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            delivered: Vec::new(),
        }
    }
}

#[cfg(test)]
impl CandidateChannel for ScriptedChannel {
    fn deliver(&mut self, line: &str) -> Result<(), AppError> {
        self.delivered.push(line.to_string());
        Ok(())
    }

    fn collect(&mut self) -> Result<String, AppError> {
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
