use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{QuestionId, QuizSession};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutcomeError {
    #[error("session is not completed")]
    NotCompleted,
}

/// `round(100 * score / total)`, halves rounding up. Zero questions score 0%.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    let rounded = (200 * score + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Whole seconds between start and end, rounded to the nearest second.
///
/// Missing timestamps, or an end before the start, give 0.
#[must_use]
pub fn time_taken_secs(started_at: Option<DateTime<Utc>>, ended_at: Option<DateTime<Utc>>) -> u64 {
    let (Some(start), Some(end)) = (started_at, ended_at) else {
        return 0;
    };
    let millis = (end - start).num_milliseconds();
    u64::try_from(millis).map_or(0, |ms| (ms + 500) / 1000)
}

/// Per-question line of the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub question_id: QuestionId,
    pub prompt: String,
    pub correct_index: usize,
    pub correct_text: String,
    /// `None` means the slot was never answered.
    pub selected_index: Option<usize>,
    pub selected_text: Option<String>,
    pub is_correct: bool,
}

/// Feedback tier for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Great,
    Good,
    Fair,
    KeepPracticing,
}

/// Colour family the results screen uses for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Success,
    Warning,
    Danger,
}

impl ScoreBand {
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => Self::Excellent,
            80..=89 => Self::Great,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            _ => Self::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! Outstanding performance!",
            ScoreBand::Great => "Great job! Well done!",
            ScoreBand::Good => "Good work! Keep it up!",
            ScoreBand::Fair => "Not bad! Room for improvement.",
            ScoreBand::KeepPracticing => "Keep practicing! You'll do better next time.",
        }
    }

    #[must_use]
    pub fn tone(self) -> ScoreTone {
        match self {
            ScoreBand::Excellent | ScoreBand::Great => ScoreTone::Success,
            ScoreBand::Good | ScoreBand::Fair => ScoreTone::Warning,
            ScoreBand::KeepPracticing => ScoreTone::Danger,
        }
    }
}

/// Everything derived from a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    score: u32,
    total: u32,
    percentage: u8,
    time_taken_secs: u64,
    reviews: Vec<QuestionReview>,
}

impl QuizOutcome {
    /// Score a completed session.
    ///
    /// # Errors
    ///
    /// Returns `OutcomeError::NotCompleted` for a loading or active session.
    pub fn from_session(session: &QuizSession) -> Result<Self, OutcomeError> {
        if !session.is_completed() {
            return Err(OutcomeError::NotCompleted);
        }

        let reviews: Vec<QuestionReview> = session
            .questions()
            .iter()
            .zip(session.answers())
            .map(|(question, answer)| QuestionReview {
                question_id: question.id().clone(),
                prompt: question.prompt().to_owned(),
                correct_index: question.correct_answer(),
                correct_text: question.correct_option().to_owned(),
                selected_index: *answer,
                selected_text: answer.and_then(|i| question.option(i)).map(str::to_owned),
                is_correct: question.is_correct(*answer),
            })
            .collect();

        let total = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
        let score = session.score();

        Ok(Self {
            score,
            total,
            percentage: percentage(score, total),
            time_taken_secs: time_taken_secs(session.started_at(), session.completed_at()),
            reviews,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.score)
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> u64 {
        self.time_taken_secs
    }

    #[must_use]
    pub fn reviews(&self) -> &[QuestionReview] {
        &self.reviews
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percentage(self.percentage)
    }
}
