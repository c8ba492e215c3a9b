use chrono::{DateTime, Utc};
use dioxus::prelude::Key;

use quiz_core::model::{HighScoreBoard, QuestionReview, ScoreTone};
use services::{QuizController, QuizReport};

use super::time_fmt::{format_countdown, format_date, format_seconds};

/// Seconds left at which the countdown turns red.
pub const LOW_TIME_SECS: u32 = 10;

/// `A`, `B`, `C`, ... for option badges.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

/// What a key press asks the quiz to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Next,
    Previous,
}

/// Map a key to an intent: `1`-`9` pick an option, right arrow or Enter
/// moves on, left arrow goes back.
#[must_use]
pub fn key_intent(key: &Key) -> Option<QuizIntent> {
    match key {
        Key::Enter | Key::ArrowRight => Some(QuizIntent::Next),
        Key::ArrowLeft => Some(QuizIntent::Previous),
        Key::Character(value) => {
            let mut chars = value.chars();
            let digit = chars.next()?.to_digit(10)?;
            if chars.next().is_some() || digit == 0 {
                return None;
            }
            usize::try_from(digit - 1).ok().map(QuizIntent::Select)
        }
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

/// Everything the active-question screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub total: usize,
    pub category: Option<String>,
    pub difficulty: Option<&'static str>,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub selected_label: Option<String>,
    pub progress_percent: u8,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub submitting: bool,
    pub is_last: bool,
}

impl QuestionVm {
    #[must_use]
    pub fn from_controller(controller: &QuizController) -> Option<Self> {
        let session = controller.session();
        let question = session.current_question()?;
        let selected = session.current_answer();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                letter: option_letter(index),
                text: text.clone(),
                selected: selected == Some(index),
            })
            .collect();

        Some(Self {
            number: session.position() + 1,
            total: session.total(),
            category: question.category().map(str::to_owned),
            difficulty: question.difficulty().map(|d| d.as_str()),
            prompt: question.prompt().to_owned(),
            options,
            selected_label: selected.map(|i| format!("Selected: Option {}", option_letter(i))),
            progress_percent: session.progress_percent(),
            can_advance: controller.can_advance(),
            can_retreat: controller.can_retreat(),
            submitting: session.is_submitting(),
            is_last: session.is_last_question(),
        })
    }

    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("Question {} of {}", self.number, self.total)
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.submitting {
            "..."
        } else if self.is_last {
            "Finish"
        } else {
            "Next"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub remaining_secs: u32,
    pub label: String,
    /// Share of the window already used, 0-100.
    pub elapsed_percent: u8,
    pub is_low: bool,
}

impl TimerVm {
    /// `None` when no countdown is running.
    #[must_use]
    pub fn from_controller(controller: &QuizController, now: DateTime<Utc>) -> Option<Self> {
        let remaining = controller.remaining_secs(now)?;
        let total = controller.settings().question_time_secs().max(1);
        let remaining = remaining.min(total);
        let elapsed = u64::from(total - remaining) * 100 / u64::from(total);

        Some(Self {
            remaining_secs: remaining,
            label: format_countdown(remaining),
            elapsed_percent: u8::try_from(elapsed).unwrap_or(100),
            is_low: remaining <= LOW_TIME_SECS,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub prompt: String,
    pub your_answer: String,
    /// Only filled when the answer was wrong or missing.
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}

impl ReviewRowVm {
    fn from_review(number: usize, review: &QuestionReview) -> Self {
        let your_answer = match (review.selected_index, review.selected_text.as_deref()) {
            (Some(index), Some(text)) => format!("{} - {text}", option_letter(index)),
            _ => "No answer selected".to_owned(),
        };
        let correct_answer = (!review.is_correct).then(|| {
            format!(
                "{} - {}",
                option_letter(review.correct_index),
                review.correct_text
            )
        });

        Self {
            number,
            prompt: review.prompt.clone(),
            your_answer,
            correct_answer,
            is_correct: review.is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreRowVm {
    pub rank: usize,
    pub percentage_label: String,
    pub date_label: String,
    pub score_label: String,
    pub time_label: String,
    /// The attempt that was just recorded.
    pub current: bool,
}

#[must_use]
pub fn map_high_scores(board: &HighScoreBoard, current: Option<usize>) -> Vec<HighScoreRowVm> {
    board
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| HighScoreRowVm {
            rank: index + 1,
            percentage_label: format!("{}%", entry.percentage),
            date_label: format_date(entry.date),
            score_label: format!("{}/{}", entry.score, entry.total),
            time_label: format_seconds(entry.time_taken),
            current: current == Some(index),
        })
        .collect()
}

#[must_use]
pub fn tone_class(tone: ScoreTone) -> &'static str {
    match tone {
        ScoreTone::Success => "tone-success",
        ScoreTone::Warning => "tone-warning",
        ScoreTone::Danger => "tone-danger",
    }
}

/// Results screen for one finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: &'static str,
    pub is_new_high_score: bool,
    pub score_label: String,
    pub percentage_label: String,
    pub message: &'static str,
    pub tone_class: &'static str,
    pub time_taken_label: String,
    pub incorrect: u32,
    pub reviews: Vec<ReviewRowVm>,
    pub high_scores: Vec<HighScoreRowVm>,
    pub saved: bool,
}

impl ResultsVm {
    #[must_use]
    pub fn from_report(report: &QuizReport) -> Self {
        let outcome = &report.outcome;
        let record = &report.record;
        let band = outcome.band();

        Self {
            title: if record.is_new_high_score {
                "New High Score!"
            } else {
                "Quiz Complete!"
            },
            is_new_high_score: record.is_new_high_score,
            score_label: format!("{}/{}", outcome.score(), outcome.total()),
            percentage_label: format!("{}% Correct", outcome.percentage()),
            message: band.message(),
            tone_class: tone_class(band.tone()),
            time_taken_label: format_seconds(outcome.time_taken_secs()),
            incorrect: outcome.incorrect(),
            reviews: outcome
                .reviews()
                .iter()
                .enumerate()
                .map(|(i, review)| ReviewRowVm::from_review(i + 1, review))
                .collect(),
            high_scores: map_high_scores(&record.board, record.rank),
            saved: record.persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{QuizSettings, QuizSettingsDraft};
    use quiz_core::time::fixed_now;
    use services::QuestionOrigin;
    use services::questions::fallback_questions;

    fn started(settings: QuizSettings) -> QuizController {
        let mut controller = QuizController::new(settings);
        let ticket = controller.begin_loading();
        controller
            .finish_loading(
                ticket,
                fallback_questions(3),
                QuestionOrigin::Fallback,
                fixed_now(),
            )
            .unwrap();
        controller
    }

    #[test]
    fn letters_follow_the_alphabet() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(option_letter(26), '?');
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(
            key_intent(&Key::Character("1".into())),
            Some(QuizIntent::Select(0))
        );
        assert_eq!(
            key_intent(&Key::Character("9".into())),
            Some(QuizIntent::Select(8))
        );
        assert_eq!(key_intent(&Key::Character("0".into())), None);
        assert_eq!(key_intent(&Key::Character("a".into())), None);
        assert_eq!(key_intent(&Key::Character("12".into())), None);
        assert_eq!(key_intent(&Key::Enter), Some(QuizIntent::Next));
        assert_eq!(key_intent(&Key::ArrowRight), Some(QuizIntent::Next));
        assert_eq!(key_intent(&Key::ArrowLeft), Some(QuizIntent::Previous));
        assert_eq!(key_intent(&Key::Escape), None);
    }

    #[test]
    fn question_vm_tracks_selection_and_gates() {
        let mut controller = started(QuizSettings::default());
        let vm = QuestionVm::from_controller(&controller).unwrap();
        assert_eq!(vm.counter_label(), "Question 1 of 3");
        assert_eq!(vm.options.len(), 4);
        assert!(!vm.can_advance);
        assert!(!vm.can_retreat);
        assert_eq!(vm.selected_label, None);
        assert_eq!(vm.next_label(), "Next");
        assert_eq!(vm.progress_percent, 33);

        controller.select_answer(1).unwrap();
        let vm = QuestionVm::from_controller(&controller).unwrap();
        assert!(vm.can_advance);
        assert!(vm.options[1].selected);
        assert_eq!(vm.selected_label.as_deref(), Some("Selected: Option B"));
    }

    #[test]
    fn question_vm_is_absent_while_loading() {
        let mut controller = QuizController::new(QuizSettings::default());
        controller.begin_loading();
        assert!(QuestionVm::from_controller(&controller).is_none());
    }

    #[test]
    fn timer_vm_counts_down() {
        let controller = started(QuizSettings::default().with_timer_enabled(true));
        let vm = TimerVm::from_controller(&controller, fixed_now()).unwrap();
        assert_eq!(vm.label, "0:30");
        assert_eq!(vm.elapsed_percent, 0);
        assert!(!vm.is_low);

        let later = fixed_now() + Duration::seconds(21);
        let vm = TimerVm::from_controller(&controller, later).unwrap();
        assert_eq!(vm.label, "0:09");
        assert_eq!(vm.elapsed_percent, 70);
        assert!(vm.is_low);
    }

    #[test]
    fn timer_vm_is_absent_when_disabled() {
        let settings = QuizSettingsDraft {
            timer_enabled: false,
            question_time_secs: 15,
        }
        .validate()
        .unwrap();
        let controller = started(settings);
        assert!(TimerVm::from_controller(&controller, fixed_now()).is_none());
    }

    #[test]
    fn tones_map_to_classes() {
        assert_eq!(tone_class(ScoreTone::Success), "tone-success");
        assert_eq!(tone_class(ScoreTone::Danger), "tone-danger");
    }
}
