//! Interview state machine.
//!
//! The turn loop is an explicit FSM: `ConversationState::apply` is the pure
//! transition function (no I/O, testable with canned events), and
//! `InterviewSession` is the async driver that produces the events from the
//! candidate channel and the oracle.
//!
//! Each pending requirement is asked exactly once, in order; the loop runs
//! one full Select → Ask → Evaluate → Summarize cycle per requirement and
//! terminates when the queue runs dry.

use tracing::warn;

use crate::errors::AppError;
use crate::oracle::{AnswerJudgment, Oracle};

use super::channel::CandidateChannel;
use super::state::{ConversationState, HistoryEntry, Speaker};

/// History entries folded into each summary update.
const SUMMARY_WINDOW: usize = 6;

/// One-time salute, delivered before the first question only.
pub const GREETING: &str = "Hello, and thanks for your time. \
We would like to ask you about a few specific requirements.";

/// Phases of the turn loop. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Select,
    Ask,
    Evaluate,
    Summarize,
    Done,
}

/// What happened in the current phase, carrying the data the transition
/// needs. The driver builds these; `apply` consumes them.
#[derive(Debug, Clone)]
pub enum Event {
    /// Head of the pending queue, or `None` when it ran dry.
    Selected(Option<String>),
    /// The candidate's free-text answer to the current requirement.
    Answered(String),
    /// The oracle's ruling on that answer.
    Judged(AnswerJudgment),
    /// The updated rolling summary.
    Summarized(String),
}

/// Renders the question asked for one requirement.
pub fn question_for(requirement: &str) -> String {
    format!("Do you have experience with, or otherwise meet, this requirement?\n- {requirement}")
}

impl ConversationState {
    /// Pure transition: folds one event into the state and returns the next
    /// phase. Every mutation of the conversation happens here.
    pub fn apply(&mut self, event: Event) -> Phase {
        match event {
            Event::Selected(None) => {
                self.current = None;
                self.done = true;
                Phase::Done
            }
            Event::Selected(Some(requirement)) => {
                self.current = Some(requirement);
                Phase::Ask
            }
            Event::Answered(answer) => {
                let Some(requirement) = self.current.clone() else {
                    // nothing in flight; the queue must have been drained
                    self.done = true;
                    return Phase::Done;
                };
                self.history.push(HistoryEntry::new(
                    Speaker::Interviewer,
                    question_for(&requirement),
                ));
                self.history
                    .push(HistoryEntry::new(Speaker::Candidate, answer.clone()));
                self.last_candidate_answer = answer;
                Phase::Evaluate
            }
            Event::Judged(judgment) => {
                let Some(requirement) = self.current.clone() else {
                    self.done = true;
                    return Phase::Done;
                };
                if judgment.satisfied {
                    self.fulfilled.push(requirement.clone());
                }
                self.history.push(HistoryEntry::new(
                    Speaker::Judge,
                    format!(
                        "'{}': satisfied={} ({})",
                        requirement, judgment.satisfied, judgment.rationale
                    ),
                ));
                Phase::Summarize
            }
            Event::Summarized(summary) => {
                self.summary = summary;
                Phase::Select
            }
        }
    }
}

/// What the session hands back for reconciliation and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewOutcome {
    pub fulfilled: Vec<String>,
    pub summary: String,
}

/// Async driver for the interview loop. Owns the conversation state for the
/// session's lifetime; the oracle and the candidate channel are injected.
pub struct InterviewSession<'a> {
    oracle: &'a dyn Oracle,
    channel: &'a mut dyn CandidateChannel,
    state: ConversationState,
}

impl<'a> InterviewSession<'a> {
    pub fn new(
        oracle: &'a dyn Oracle,
        channel: &'a mut dyn CandidateChannel,
        pending: Vec<String>,
        initial_summary: String,
    ) -> Self {
        Self {
            oracle,
            channel,
            state: ConversationState::new(pending, initial_summary),
        }
    }

    /// Runs the loop to completion and extracts the session outputs.
    pub async fn run(mut self) -> Result<InterviewOutcome, AppError> {
        let mut phase = Phase::Select;
        loop {
            phase = match phase {
                Phase::Select => {
                    let head = self.state.pending.pop_front();
                    self.state.apply(Event::Selected(head))
                }
                Phase::Ask => self.ask()?,
                Phase::Evaluate => self.evaluate().await,
                Phase::Summarize => self.summarize().await,
                Phase::Done => break,
            };
        }

        Ok(InterviewOutcome {
            fulfilled: self.state.fulfilled,
            summary: self.state.summary,
        })
    }

    fn ask(&mut self) -> Result<Phase, AppError> {
        let Some(requirement) = self.state.current.clone() else {
            return Ok(self.state.apply(Event::Selected(None)));
        };
        if self.state.history.is_empty() {
            self.channel.deliver(GREETING)?;
        }
        self.channel.deliver(&question_for(&requirement))?;
        let answer = self.channel.collect()?;
        Ok(self.state.apply(Event::Answered(answer)))
    }

    /// Oracle failure here is fail-closed: the requirement stays
    /// unfulfilled and the session moves on to the next one.
    async fn evaluate(&mut self) -> Phase {
        let requirement = self.state.current.clone().unwrap_or_default();
        let judgment = match self
            .oracle
            .interpret_answer(&requirement, &self.state.last_candidate_answer)
            .await
        {
            Ok(judgment) => judgment,
            Err(e) => {
                warn!("Answer interpretation failed for '{requirement}': {e}; treating as not fulfilled");
                AnswerJudgment {
                    satisfied: false,
                    rationale: "interpretation unavailable".to_string(),
                }
            }
        };
        self.state.apply(Event::Judged(judgment))
    }

    /// A failed summary update keeps the previous summary.
    async fn summarize(&mut self) -> Phase {
        let summary = match self
            .oracle
            .summarize(&self.state.summary, self.state.recent_history(SUMMARY_WINDOW))
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary update failed: {e}; keeping the previous summary");
                self.state.summary.clone()
            }
        };
        self.state.apply(Event::Summarized(summary))
    }
}
