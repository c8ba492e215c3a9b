mod high_score;
mod ids;
mod question;
mod results;
mod session;
mod settings;

pub use ids::QuestionId;

pub use high_score::{HighScoreBoard, HighScoreEntry, Insertion, MAX_HIGH_SCORES};
pub use question::{Difficulty, MIN_OPTIONS, Question, QuestionDraft, QuestionError};
pub use results::{
    OutcomeError, QuestionReview, QuizOutcome, ScoreBand, ScoreTone, percentage, time_taken_secs,
};
pub use session::{AdvanceOutcome, QuizPhase, QuizSession, TransitionError, compute_score};
pub use settings::{DEFAULT_QUESTION_TIME_SECS, QuizSettings, QuizSettingsDraft, SettingsError};
