use chrono::{DateTime, Duration, Utc};
use std::fmt;

use quiz_core::model::{AdvanceOutcome, Question, QuizSession, QuizSettings, TransitionError};

use crate::error::SessionError;
use crate::questions::QuestionOrigin;

/// Pause between confirming a question and moving on.
pub const ADVANCE_DELAY_MS: i64 = 300;

/// Token handed out when a load starts; a load with an older token is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What a call to [`QuizController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    /// The pending advance finished and a new question is current.
    Advanced { position: usize },
    /// The pending advance finished the quiz.
    Completed { score: u32 },
    /// The question timer ran out and forced an advance.
    TimeUp,
}

/// Owns a quiz session plus its two deadlines.
///
/// The advance delay and the per-question timer are stored as instants
/// rather than running callbacks. The view calls `tick` with the current
/// time; anything that replaces or leaves a question clears the deadlines,
/// so a stale timer can never touch a newer question or session.
#[derive(Clone)]
pub struct QuizController {
    session: QuizSession,
    settings: QuizSettings,
    origin: Option<QuestionOrigin>,
    advance_due_at: Option<DateTime<Utc>>,
    timer_deadline: Option<DateTime<Utc>>,
    load_generation: u64,
}

impl QuizController {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            session: QuizSession::new(),
            settings,
            origin: None,
            advance_due_at: None,
            timer_deadline: None,
            load_generation: 0,
        }
    }

    /// Discard the current session and wait for questions.
    pub fn begin_loading(&mut self) -> LoadTicket {
        self.session = QuizSession::new();
        self.origin = None;
        self.clear_deadlines();
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Hard reset: same as starting a fresh load.
    pub fn restart(&mut self) -> LoadTicket {
        tracing::debug!("quiz restarted");
        self.begin_loading()
    }

    /// Start the session with freshly loaded questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleLoad` if another load began after `ticket`
    /// was issued, or a transition error if the session cannot start.
    pub fn finish_loading(
        &mut self,
        ticket: LoadTicket,
        questions: Vec<Question>,
        origin: QuestionOrigin,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if ticket.0 != self.load_generation {
            return Err(SessionError::StaleLoad);
        }
        self.session.start(questions, now)?;
        self.origin = Some(origin);
        self.arm_timer(now);
        tracing::info!(
            questions = self.session.total(),
            fallback = origin == QuestionOrigin::Fallback,
            "quiz started"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `TransitionError` if the selection is not allowed right now.
    pub fn select_answer(&mut self, index: usize) -> Result<(), TransitionError> {
        self.session.select_answer(index)
    }

    /// Confirm the current question. The move happens on a later `tick`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the session is not active or already submitting.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.session.begin_advance()?;
        self.timer_deadline = None;
        self.advance_due_at = Some(now + Duration::milliseconds(ADVANCE_DELAY_MS));
        Ok(())
    }

    /// Go back one question and restart its timer.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` at the first question, while submitting, or
    /// outside the active phase.
    pub fn retreat(&mut self, now: DateTime<Utc>) -> Result<usize, TransitionError> {
        let position = self.session.retreat()?;
        self.arm_timer(now);
        Ok(position)
    }

    /// Fire whichever deadline has passed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if let Some(due) = self.advance_due_at {
            if now < due {
                return TickOutcome::Idle;
            }
            self.advance_due_at = None;
            return match self.session.finish_advance(now) {
                Ok(AdvanceOutcome::Moved { position }) => {
                    self.arm_timer(now);
                    TickOutcome::Advanced { position }
                }
                Ok(AdvanceOutcome::Completed { score }) => {
                    self.clear_deadlines();
                    tracing::info!(score, total = self.session.total(), "quiz completed");
                    TickOutcome::Completed { score }
                }
                Err(err) => {
                    tracing::debug!(error = %err, "pending advance dropped");
                    TickOutcome::Idle
                }
            };
        }

        match self.timer_deadline {
            Some(deadline) if now >= deadline => {
                self.timer_deadline = None;
                match self.advance(now) {
                    Ok(()) => TickOutcome::TimeUp,
                    Err(err) => {
                        tracing::debug!(error = %err, "timer expiry ignored");
                        TickOutcome::Idle
                    }
                }
            }
            _ => TickOutcome::Idle,
        }
    }

    /// Apply new settings. Turning the timer on starts a fresh window for the
    /// current question; turning it off cancels it.
    pub fn set_settings(&mut self, settings: QuizSettings, now: DateTime<Utc>) {
        let changed = settings != self.settings;
        self.settings = settings;
        if changed && !self.session.is_submitting() {
            self.arm_timer(now);
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn origin(&self) -> Option<QuestionOrigin> {
        self.origin
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == Some(QuestionOrigin::Fallback)
    }

    /// Gate for the "next" control: an answer is recorded and nothing is pending.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session.is_active()
            && !self.session.is_submitting()
            && self.session.current_answer().is_some()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.session.is_active() && !self.session.is_submitting() && self.session.position() > 0
    }

    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        self.advance_due_at.is_some()
    }

    #[must_use]
    pub fn timer_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer_deadline
    }

    /// Whole seconds left on the question timer, rounded up.
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<u32> {
        let deadline = self.timer_deadline?;
        let millis = (deadline - now).num_milliseconds().max(0);
        let secs = (millis + 999) / 1000;
        Some(u32::try_from(secs).unwrap_or(u32::MAX))
    }

    fn arm_timer(&mut self, now: DateTime<Utc>) {
        self.timer_deadline = if self.settings.timer_enabled() && self.session.is_active() {
            Some(now + Duration::seconds(i64::from(self.settings.question_time_secs())))
        } else {
            None
        };
    }

    fn clear_deadlines(&mut self) {
        self.advance_due_at = None;
        self.timer_deadline = None;
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("session", &self.session)
            .field("settings", &self.settings)
            .field("origin", &self.origin)
            .field("advance_due_at", &self.advance_due_at)
            .field("timer_deadline", &self.timer_deadline)
            .field("load_generation", &self.load_generation)
            .finish()
    }
}
