use thiserror::Error;

use crate::model::{OutcomeError, QuestionError, SettingsError, TransitionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Outcome(#[from] OutcomeError),
}
