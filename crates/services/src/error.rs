//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{OutcomeError, QuestionError, SettingsError, TransitionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Reasons a question source could not deliver.
///
/// `QuestionService` turns every one of these into the bundled fallback list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question service answered with response code {0}")]
    ResponseCode(u8),
    #[error("question service returned no questions")]
    Empty,
    #[error("question request timed out after {0:?}")]
    TimedOut(std::time::Duration),
    #[error("could not decode {field}: {reason}")]
    Decode { field: &'static str, reason: String },
    #[error(transparent)]
    Invalid(#[from] QuestionError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the quiz controller and `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question load was superseded by a restart")]
    StaleLoad,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Outcome(#[from] OutcomeError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
