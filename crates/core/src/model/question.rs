use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question needs at least a correct option and one distractor.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id must not be empty")]
    EmptyId,

    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("question needs at least {MIN_OPTIONS} options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} must not be empty")]
    EmptyOption { index: usize },

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuestionError::UnknownDifficulty(raw.to_owned())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated question as it comes out of a source.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or prompt is blank, there are fewer than
    /// [`MIN_OPTIONS`] options, an option is blank, or the correct index does not
    /// point at an option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = QuestionId::new(self.id.trim());
        if id.is_blank() {
            return Err(QuestionError::EmptyId);
        }

        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let len = self.options.len();
        if len < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { len });
        }
        if let Some(index) = self.options.iter().position(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if self.correct_answer >= len {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                index: self.correct_answer,
                len,
            });
        }

        let category = self
            .category
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());

        Ok(Question {
            id,
            prompt,
            options: self.options,
            correct_answer: self.correct_answer,
            category,
            difficulty: self.difficulty,
        })
    }
}

/// A multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
    category: Option<String>,
    difficulty: Option<Difficulty>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// True only for a recorded answer that matches the correct index.
    #[must_use]
    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: "1".into(),
            prompt: "What is the capital of France?".into(),
            options: vec!["London".into(), "Berlin".into(), "Paris".into(), "Madrid".into()],
            correct_answer: 2,
            category: Some("Geography".into()),
            difficulty: Some(Difficulty::Easy),
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let q = draft().validate().unwrap();
        assert_eq!(q.id().as_str(), "1");
        assert_eq!(q.option_count(), 4);
        assert_eq!(q.correct_option(), "Paris");
        assert_eq!(q.category(), Some("Geography"));
        assert!(q.is_correct(Some(2)));
        assert!(!q.is_correct(Some(0)));
        assert!(!q.is_correct(None));
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let err = QuestionDraft {
            correct_answer: 4,
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, QuestionError::CorrectAnswerOutOfRange { index: 4, len: 4 });
    }

    #[test]
    fn rejects_single_option_and_blank_fields() {
        let err = QuestionDraft {
            options: vec!["Only".into()],
            correct_answer: 0,
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });

        let err = QuestionDraft {
            prompt: "   ".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);

        let err = QuestionDraft {
            id: String::new(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyId);
    }

    #[test]
    fn blank_category_is_dropped() {
        let q = QuestionDraft {
            category: Some("  ".into()),
            ..draft()
        }
        .validate()
        .unwrap();
        assert_eq!(q.category(), None);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(QuestionError::UnknownDifficulty(_))
        ));
    }
}
