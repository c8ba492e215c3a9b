use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::Question;

use super::{QuestionSource, fallback_questions};
use crate::error::QuestionSourceError;

/// How long a source may take before the bundled list is used instead.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a batch of questions came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionOrigin {
    Remote,
    /// The source failed and the bundled list was used.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedQuestions {
    pub questions: Vec<Question>,
    pub origin: QuestionOrigin,
}

impl FetchedQuestions {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == QuestionOrigin::Fallback
    }
}

/// One attempt at the configured source, then the bundled list.
#[derive(Clone)]
pub struct QuestionService {
    source: Arc<dyn QuestionSource>,
    timeout: Duration,
}

impl QuestionService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch `count` questions. Never fails; a source that errors or stalls
    /// past the timeout yields the fallback list.
    pub async fn fetch(&self, count: usize) -> FetchedQuestions {
        let attempt = tokio::time::timeout(self.timeout, self.source.fetch(count))
            .await
            .unwrap_or(Err(QuestionSourceError::TimedOut(self.timeout)));
        match attempt {
            Ok(mut questions) if !questions.is_empty() => {
                questions.truncate(count);
                tracing::debug!(count = questions.len(), "questions fetched");
                FetchedQuestions {
                    questions,
                    origin: QuestionOrigin::Remote,
                }
            }
            Ok(_) => {
                tracing::warn!("question source returned nothing, using fallback list");
                Self::fallback(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "question source unavailable, using fallback list");
                Self::fallback(count)
            }
        }
    }

    fn fallback(count: usize) -> FetchedQuestions {
        FetchedQuestions {
            questions: fallback_questions(count),
            origin: QuestionOrigin::Fallback,
        }
    }
}
