use quiz_core::Clock;
use quiz_core::model::{QuizOutcome, QuizSession, QuizSettings};

use crate::error::{SessionError, SettingsServiceError};
use crate::high_score_service::{HighScoreRecord, HighScoreService};
use crate::questions::{FetchedQuestions, QuestionService};
use crate::settings_service::SettingsService;

use super::controller::{LoadTicket, QuizController};

/// Scored attempt plus its effect on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    pub outcome: QuizOutcome,
    pub record: HighScoreRecord,
}

/// Orchestrates one quiz run: settings, questions, scoring and the leaderboard.
///
/// The controller is handed in by the caller so the view can keep it in its
/// own state while the fetch is in flight.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    question_count: usize,
    questions: QuestionService,
    settings: SettingsService,
    high_scores: HighScoreService,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        question_count: usize,
        questions: QuestionService,
        settings: SettingsService,
        high_scores: HighScoreService,
    ) -> Self {
        Self {
            clock,
            question_count: question_count.max(1),
            questions,
            settings,
            high_scores,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// A loading controller seeded with the persisted settings.
    pub async fn new_controller(&self) -> QuizController {
        QuizController::new(self.settings.load().await)
    }

    /// One fetch of `question_count` questions, falling back when needed.
    pub async fn load_questions(&self) -> FetchedQuestions {
        self.questions.fetch(self.question_count).await
    }

    /// Hand a finished fetch to the controller.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleLoad` when the controller was restarted
    /// after `ticket` was issued.
    pub fn begin(
        &self,
        controller: &mut QuizController,
        ticket: LoadTicket,
        fetched: FetchedQuestions,
    ) -> Result<(), SessionError> {
        controller.finish_loading(ticket, fetched.questions, fetched.origin, self.clock.now())
    }

    /// Reset `controller` and load a fresh set of questions into it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session could not start.
    pub async fn start(&self, controller: &mut QuizController) -> Result<(), SessionError> {
        let ticket = controller.begin_loading();
        let fetched = self.load_questions().await;
        self.begin(controller, ticket, fetched)
    }

    /// Score a completed session and merge it into the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Outcome` if the session has not completed.
    pub async fn finish(&self, session: &QuizSession) -> Result<QuizReport, SessionError> {
        let outcome = QuizOutcome::from_session(session)?;
        let record = self.high_scores.record(&outcome, self.clock.today()).await;
        tracing::info!(
            score = outcome.score(),
            total = outcome.total(),
            percentage = outcome.percentage(),
            new_high_score = record.is_new_high_score,
            "quiz recorded"
        );
        Ok(QuizReport { outcome, record })
    }

    /// Persist the timer toggle and return the settings to apply.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if the write fails.
    pub async fn set_timer_enabled(&self, enabled: bool) -> Result<QuizSettings, SettingsServiceError> {
        self.settings.set_timer_enabled(enabled).await
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScoreService {
        &self.high_scores
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }
}
