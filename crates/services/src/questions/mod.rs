mod fallback;
mod open_trivia;
mod service;
mod shuffle;

use async_trait::async_trait;

use quiz_core::model::Question;

use crate::error::QuestionSourceError;

pub use fallback::{FALLBACK_QUESTION_COUNT, StaticQuestionSource, fallback_questions};
pub use open_trivia::{OpenTriviaSource, REQUEST_TIMEOUT, TriviaQuestion, TriviaResponse};
pub use service::{DEFAULT_FETCH_TIMEOUT, FetchedQuestions, QuestionOrigin, QuestionService};
pub use shuffle::assemble_options;

/// Anything that can hand out a batch of questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `count` questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when the source is unavailable or its
    /// payload cannot be turned into questions.
    async fn fetch(&self, count: usize) -> Result<Vec<Question>, QuestionSourceError>;
}
