#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod high_score_service;
mod kv;
pub mod questions;
pub mod sessions;
pub mod settings_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use config::QuizConfig;
pub use error::{AppServicesError, QuestionSourceError, SessionError, SettingsServiceError};
pub use high_score_service::{HighScoreRecord, HighScoreService};
pub use questions::{
    FetchedQuestions, OpenTriviaSource, QuestionOrigin, QuestionService, QuestionSource,
    StaticQuestionSource,
};
pub use sessions::{
    ADVANCE_DELAY_MS, LoadTicket, QuizController, QuizReport, QuizService, TickOutcome,
};
pub use settings_service::SettingsService;
