//! Conversation state — owned exclusively by one interview session.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Candidate,
    /// The oracle's per-answer ruling, recorded for the transcript.
    Judge,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Interviewer => "interviewer",
            Speaker::Candidate => "candidate",
            Speaker::Judge => "judge",
        }
    }
}

/// One transcript line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Mutable state of one interview session. Created once per session,
/// mutated only through `apply`, discarded after `fulfilled` and `summary`
/// are extracted.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Requirements still to ask about, in first-pass order.
    pub pending: VecDeque<String>,
    /// Requirements the candidate is now judged to fulfill.
    pub fulfilled: Vec<String>,
    /// Full transcript, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Rolling long-horizon summary.
    pub summary: String,
    /// The requirement currently being asked about.
    pub current: Option<String>,
    pub last_candidate_answer: String,
    pub done: bool,
}

impl ConversationState {
    pub fn new(pending: Vec<String>, initial_summary: String) -> Self {
        Self {
            pending: pending.into(),
            summary: initial_summary,
            ..Self::default()
        }
    }

    /// The most recent history window handed to the summarizer.
    pub fn recent_history(&self, window: usize) -> &[HistoryEntry] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_pending_and_summary() {
        let state = ConversationState::new(
            vec!["Docker".to_string(), "Kafka".to_string()],
            "prior context".to_string(),
        );
        assert_eq!(state.pending.len(), 2);
        assert_eq!(state.summary, "prior context");
        assert!(state.history.is_empty());
        assert!(!state.done);
    }

    #[test]
    fn test_recent_history_is_bounded() {
        let mut state = ConversationState::default();
        for i in 0..10 {
            state
                .history
                .push(HistoryEntry::new(Speaker::Candidate, format!("line {i}")));
        }
        let recent = state.recent_history(6);
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].text, "line 4");
        assert_eq!(recent[5].text, "line 9");
    }

    #[test]
    fn test_recent_history_shorter_than_window() {
        let mut state = ConversationState::default();
        state
            .history
            .push(HistoryEntry::new(Speaker::Interviewer, "only line"));
        assert_eq!(state.recent_history(6).len(), 1);
    }
}
