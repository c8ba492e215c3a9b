use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("transition requires the {expected:?} phase, session is {actual:?}")]
    WrongPhase {
        expected: QuizPhase,
        actual: QuizPhase,
    },

    #[error("an advance is already in progress")]
    Submitting,

    #[error("no advance is in progress")]
    NotSubmitting,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("option {index} does not exist (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("cannot start a quiz without questions")]
    NoQuestions,
}

/// Lifecycle of a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Questions are being fetched; every input is ignored.
    Loading,
    /// Questions are on screen.
    Active,
    /// Score and end timestamp are fixed.
    Completed,
}

/// What `finish_advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved { position: usize },
    Completed { score: u32 },
}

/// One attempt at a fixed question set.
///
/// All mutation goes through the transition methods. A failed transition
/// returns `TransitionError` and leaves the session exactly as it was, so
/// callers can treat errors as no-ops.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizSession {
    phase: QuizPhase,
    questions: Vec<Question>,
    position: usize,
    answers: Vec<Option<usize>>,
    score: u32,
    submitting: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// A session waiting for its questions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Loading,
            questions: Vec::new(),
            position: 0,
            answers: Vec::new(),
            score: 0,
            submitting: false,
            started_at: None,
            completed_at: None,
        }
    }

    /// Load questions and begin the attempt.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` unless the session is loading, and
    /// `TransitionError::NoQuestions` for an empty question list.
    pub fn start(
        &mut self,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.require_phase(QuizPhase::Loading)?;
        if questions.is_empty() {
            return Err(TransitionError::NoQuestions);
        }

        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.position = 0;
        self.score = 0;
        self.submitting = false;
        self.started_at = Some(started_at);
        self.completed_at = None;
        self.phase = QuizPhase::Active;
        Ok(())
    }

    /// Record `index` for the current question. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the session is not active, an advance is
    /// pending, or the option does not exist.
    pub fn select_answer(&mut self, index: usize) -> Result<(), TransitionError> {
        self.require_idle()?;
        let len = self.questions[self.position].option_count();
        if index >= len {
            return Err(TransitionError::OptionOutOfRange { index, len });
        }
        self.answers[self.position] = Some(index);
        Ok(())
    }

    /// Start moving past the current question.
    ///
    /// Not gated on an answer: a timer expiry advances an unanswered slot.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the session is not active or already submitting.
    pub fn begin_advance(&mut self) -> Result<(), TransitionError> {
        self.require_idle()?;
        self.submitting = true;
        Ok(())
    }

    /// Complete a pending advance: next question, or score and finish.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NotSubmitting` if `begin_advance` was not called
    /// first, or `WrongPhase` if the session is not active.
    pub fn finish_advance(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<AdvanceOutcome, TransitionError> {
        self.require_phase(QuizPhase::Active)?;
        if !self.submitting {
            return Err(TransitionError::NotSubmitting);
        }
        self.submitting = false;

        if self.position + 1 < self.questions.len() {
            self.position += 1;
            return Ok(AdvanceOutcome::Moved {
                position: self.position,
            });
        }

        self.score = compute_score(&self.questions, &self.answers);
        self.completed_at = Some(now);
        self.phase = QuizPhase::Completed;
        Ok(AdvanceOutcome::Completed { score: self.score })
    }

    /// Step back one question. Answers are kept.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the session is not active, an advance is
    /// pending, or the first question is current.
    pub fn retreat(&mut self) -> Result<usize, TransitionError> {
        self.require_idle()?;
        if self.position == 0 {
            return Err(TransitionError::AtFirstQuestion);
        }
        self.position -= 1;
        Ok(self.position)
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == QuizPhase::Loading
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == QuizPhase::Active
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Active => self.questions.get(self.position),
            QuizPhase::Loading | QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.position).copied().flatten()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Only meaningful once completed.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Position-based progress, 1-based like the question counter.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        if self.is_completed() {
            return 100;
        }
        let answered = u32::try_from(self.position + 1).unwrap_or(u32::MAX);
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        super::percentage(answered, total)
    }

    fn require_phase(&self, expected: QuizPhase) -> Result<(), TransitionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn require_idle(&self) -> Result<(), TransitionError> {
        self.require_phase(QuizPhase::Active)?;
        if self.submitting {
            return Err(TransitionError::Submitting);
        }
        Ok(())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("answers", &self.answers)
            .field("score", &self.score)
            .field("submitting", &self.submitting)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}

/// Number of slots whose recorded answer equals the question's correct index.
#[must_use]
pub fn compute_score(questions: &[Question], answers: &[Option<usize>]) -> u32 {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(**answer))
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}
