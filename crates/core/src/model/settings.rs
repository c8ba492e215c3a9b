use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_QUESTION_TIME_SECS: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question time must be at least one second")]
    ZeroQuestionTime,
}

/// Per-user quiz preferences, persisted across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuizSettingsDraft", into = "QuizSettingsDraft")]
pub struct QuizSettings {
    timer_enabled: bool,
    question_time_secs: u32,
}

/// Wire shape of the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettingsDraft {
    #[serde(default)]
    pub timer_enabled: bool,
    #[serde(rename = "questionTime", default = "default_question_time")]
    pub question_time_secs: u32,
}

fn default_question_time() -> u32 {
    DEFAULT_QUESTION_TIME_SECS
}

impl Default for QuizSettingsDraft {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            question_time_secs: DEFAULT_QUESTION_TIME_SECS,
        }
    }
}

impl QuizSettingsDraft {
    /// # Errors
    ///
    /// Returns `SettingsError::ZeroQuestionTime` for a zero-second timer.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        if self.question_time_secs == 0 {
            return Err(SettingsError::ZeroQuestionTime);
        }
        Ok(QuizSettings {
            timer_enabled: self.timer_enabled,
            question_time_secs: self.question_time_secs,
        })
    }
}

impl TryFrom<QuizSettingsDraft> for QuizSettings {
    type Error = SettingsError;

    fn try_from(draft: QuizSettingsDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<QuizSettings> for QuizSettingsDraft {
    fn from(settings: QuizSettings) -> Self {
        Self {
            timer_enabled: settings.timer_enabled,
            question_time_secs: settings.question_time_secs,
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            question_time_secs: DEFAULT_QUESTION_TIME_SECS,
        }
    }
}

impl QuizSettings {
    #[must_use]
    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    #[must_use]
    pub fn question_time_secs(&self) -> u32 {
        self.question_time_secs
    }

    #[must_use]
    pub fn with_timer_enabled(self, timer_enabled: bool) -> Self {
        Self {
            timer_enabled,
            ..self
        }
    }
}
