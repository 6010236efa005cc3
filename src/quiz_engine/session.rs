//! Per-question answer evaluation and progression.
//!
//! A [`Session`] walks a [`Quiz`] one question at a time:
//!
//! ```text
//! Awaiting(i) --submit_answer--> Locked(i) --advance--> Awaiting(i+1)
//!                                          \--advance (last)--> Ended
//! ```
//!
//! `submit_answer` evaluates and scores immediately, then hands back an
//! [`AdvanceTicket`]. The caller schedules `advance(ticket)` after the
//! feedback delay. Only the ticket currently pending on the session is
//! honoured, so a timer that outlives [`Session::invalidate`] (or belongs to
//! another session entirely) is a harmless no-op.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::quiz_engine::{
    config::QuizConfig,
    error::QuizError,
    generator::generate_quiz,
    models::{Category, Item, OptionMark, Progress, Question, Quiz, QuizResult},
};

/// Receives the outcome of each evaluated answer, synchronously.
pub trait FeedbackSink {
    fn on_correct_answer(&self);
    fn on_wrong_answer(&self);
}

/// Sink for callers that render feedback from session state alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl FeedbackSink for NoFeedback {
    fn on_correct_answer(&self) {}
    fn on_wrong_answer(&self) {}
}

/// Identifies one scheduled advance. Only the pending ticket moves a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    session: u32,
    question: usize,
    serial: u32,
}

impl AdvanceTicket {
    pub fn question(&self) -> usize {
        self.question
    }
}

/// Outcome of `Session::submit_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The answer was scored and the question is now locked.
    Evaluated { correct: bool, ticket: AdvanceTicket },
    /// The question was already answered; nothing changed.
    Ignored,
}

/// Outcome of `Session::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    /// Returned once, on the transition out of the last question.
    Ended(QuizResult),
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Awaiting,
    Locked {
        selection: String,
        correct: bool,
        pending: Option<AdvanceTicket>,
    },
    Ended(QuizResult),
}

/// One run through a quiz: position, score and the pending advance.
#[derive(Debug, Clone)]
pub struct Session {
    id: u32,
    quiz: Quiz,
    points_per_correct: u32,
    index: usize,
    score: u32,
    serial: u32,
    phase: Phase,
}

impl Session {
    /// Generate a quiz for `category` and open a session on its first question.
    pub fn start<R: Rng + ?Sized>(
        category: &Category,
        config: &QuizConfig,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let quiz = generate_quiz(category, rng)?;
        let session = Session::new(rng.next_u32(), quiz, config.points_per_correct)?;
        info!(
            session = %session.label(),
            questions = session.len(),
            "session started"
        );
        Ok(session)
    }

    /// Wrap an already generated quiz.
    pub fn new(id: u32, quiz: Quiz, points_per_correct: u32) -> Result<Self, QuizError> {
        if quiz.is_empty() {
            return Err(QuizError::TooFewItems {
                category: quiz.category_id.clone(),
                found: 0,
                required: 1,
            });
        }
        Ok(Session {
            id,
            quiz,
            points_per_correct,
            index: 0,
            score: 0,
            serial: 0,
            phase: Phase::Awaiting,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Human-readable id, e.g. `animals-1A2B3C4D`.
    pub fn label(&self) -> String {
        format!("{}-{:08X}", self.quiz.category_id, self.id)
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn len(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest reachable score for this quiz.
    pub fn total(&self) -> u32 {
        u32::try_from(self.quiz.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.points_per_correct)
    }

    /// The question on screen, or `None` once the session has ended.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Ended(_) => None,
            _ => self.quiz.get(self.index),
        }
    }

    pub fn selection(&self) -> Option<&str> {
        match &self.phase {
            Phase::Locked { selection, .. } => Some(selection),
            _ => None,
        }
    }

    pub fn last_answer_correct(&self) -> Option<bool> {
        match self.phase {
            Phase::Locked { correct, .. } => Some(correct),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Locked { .. })
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    pub fn result(&self) -> Option<QuizResult> {
        match self.phase {
            Phase::Ended(result) => Some(result),
            _ => None,
        }
    }

    pub fn pending_ticket(&self) -> Option<AdvanceTicket> {
        match self.phase {
            Phase::Locked { pending, .. } => pending,
            _ => None,
        }
    }

    pub fn progress(&self) -> Progress {
        let total = self.quiz.len();
        let done = if self.is_ended() { total } else { self.index };
        Progress {
            index: self.index,
            total,
            percent: done as f64 / total as f64 * 100.0,
        }
    }

    /// Display state for each option of the current question.
    pub fn option_marks(&self) -> Vec<(&Item, OptionMark)> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        let selection = self.selection();
        question
            .options
            .iter()
            .map(|option| {
                let mark = match selection {
                    None => OptionMark::Unanswered,
                    Some(_) if option.id == question.target.id => OptionMark::Correct,
                    Some(sel) if option.id == sel => OptionMark::WrongPick,
                    Some(_) => OptionMark::Dimmed,
                };
                (option, mark)
            })
            .collect()
    }

    /// Evaluate a pick for the current question.
    ///
    /// Scoring and feedback happen here, once. While the question is locked
    /// further picks are ignored.
    pub fn submit_answer<F: FeedbackSink + ?Sized>(
        &mut self,
        option_id: &str,
        feedback: &F,
    ) -> Result<Submission, QuizError> {
        match self.phase {
            Phase::Ended(_) => {
                warn!(session = %self.label(), "answer submitted after session ended");
                return Err(QuizError::SessionEnded);
            }
            Phase::Locked { .. } => {
                debug!(session = %self.label(), option = option_id, "answer ignored, question locked");
                return Ok(Submission::Ignored);
            }
            Phase::Awaiting => {}
        }

        let question = self.quiz.get(self.index).ok_or(QuizError::SessionEnded)?;
        if !question.has_option(option_id) {
            warn!(session = %self.label(), option = option_id, "unknown option");
            return Err(QuizError::UnknownOption(option_id.to_string()));
        }

        let correct = question.is_correct(option_id);
        if correct {
            self.score = self.score.saturating_add(self.points_per_correct);
            feedback.on_correct_answer();
        } else {
            feedback.on_wrong_answer();
        }

        self.serial = self.serial.wrapping_add(1);
        let ticket = AdvanceTicket { session: self.id, question: self.index, serial: self.serial };
        self.phase = Phase::Locked {
            selection: option_id.to_string(),
            correct,
            pending: Some(ticket),
        };

        debug!(
            session = %self.label(),
            question = self.index,
            correct,
            score = self.score,
            "answer evaluated"
        );
        Ok(Submission::Evaluated { correct, ticket })
    }

    /// Run the deferred transition scheduled by `submit_answer`.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Advance {
        match self.phase {
            Phase::Locked { pending: Some(p), .. } if p == ticket => {}
            _ => {
                debug!(session = %self.label(), ?ticket, "stale advance ignored");
                return Advance::Stale;
            }
        }

        if self.index + 1 >= self.quiz.len() {
            let result = QuizResult { score: self.score, total: self.total() };
            self.phase = Phase::Ended(result);
            info!(session = %self.label(), %result, "session ended");
            Advance::Ended(result)
        } else {
            self.index += 1;
            self.phase = Phase::Awaiting;
            Advance::Next { index: self.index }
        }
    }

    /// Drop the pending advance so its timer can no longer move the session.
    pub fn invalidate(&mut self) -> Option<AdvanceTicket> {
        match &mut self.phase {
            Phase::Locked { pending, .. } => pending.take(),
            _ => None,
        }
    }
}
