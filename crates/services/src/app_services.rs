use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::high_score_service::HighScoreService;
use crate::questions::{OpenTriviaSource, QuestionService, QuestionSource, StaticQuestionSource};
use crate::sessions::QuizService;
use crate::settings_service::SettingsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    quiz: Arc<QuizService>,
    settings: Arc<SettingsService>,
    high_scores: Arc<HighScoreService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: &QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, config))
    }

    /// Build services over an already opened storage backend.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, config: &QuizConfig) -> Self {
        let source: Arc<dyn QuestionSource> = if config.offline {
            tracing::info!("offline mode, serving the bundled question list");
            Arc::new(StaticQuestionSource)
        } else {
            Arc::new(OpenTriviaSource::new(config.trivia_base_url.clone()))
        };
        Self::with_source(storage, clock, config, source)
    }

    /// Same as `from_storage`, with an explicit question source.
    #[must_use]
    pub fn with_source(
        storage: &Storage,
        clock: Clock,
        config: &QuizConfig,
        source: Arc<dyn QuestionSource>,
    ) -> Self {
        let settings = SettingsService::new(Arc::clone(&storage.kv));
        let high_scores = HighScoreService::new(Arc::clone(&storage.kv));
        let quiz = QuizService::new(
            clock,
            config.question_count,
            QuestionService::new(source),
            settings.clone(),
            high_scores.clone(),
        );

        Self {
            clock,
            quiz: Arc::new(quiz),
            settings: Arc::new(settings),
            high_scores: Arc::new(high_scores),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn high_scores(&self) -> Arc<HighScoreService> {
        Arc::clone(&self.high_scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn offline_config_serves_bundled_questions() {
        let config = QuizConfig::default().with_offline(true).with_question_count(3);
        let services = AppServices::from_storage(&Storage::in_memory(), fixed_clock(), &config);

        let fetched = services.quiz().load_questions().await;
        assert!(!fetched.is_fallback());
        assert_eq!(fetched.questions.len(), 3);
        assert_eq!(services.quiz().question_count(), 3);
    }

    #[tokio::test]
    async fn services_share_one_store() {
        let services =
            AppServices::from_storage(&Storage::in_memory(), fixed_clock(), &QuizConfig::default());
        services.settings().set_timer_enabled(true).await.unwrap();
        assert!(services.quiz().settings().load().await.timer_enabled());
    }
}
