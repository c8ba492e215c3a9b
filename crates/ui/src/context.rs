use std::sync::Arc;

use services::{Clock, HighScoreService, QuizService};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;

    fn quiz(&self) -> Arc<QuizService>;
    fn high_scores(&self) -> Arc<HighScoreService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    quiz: Arc<QuizService>,
    high_scores: Arc<HighScoreService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            quiz: app.quiz(),
            high_scores: app.high_scores(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn high_scores(&self) -> Arc<HighScoreService> {
        Arc::clone(&self.high_scores)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
