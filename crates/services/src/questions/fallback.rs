use async_trait::async_trait;

use quiz_core::model::{Difficulty, Question, QuestionDraft};

use super::QuestionSource;
use crate::error::QuestionSourceError;

pub const FALLBACK_QUESTION_COUNT: usize = 8;

struct Bundled {
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
    category: &'static str,
    difficulty: Difficulty,
}

const BUNDLED: [Bundled; FALLBACK_QUESTION_COUNT] = [
    Bundled {
        id: "1",
        prompt: "What is the capital of France?",
        options: ["London", "Berlin", "Paris", "Madrid"],
        correct: 2,
        category: "Geography",
        difficulty: Difficulty::Easy,
    },
    Bundled {
        id: "2",
        prompt: "Which planet is known as the Red Planet?",
        options: ["Venus", "Mars", "Jupiter", "Saturn"],
        correct: 1,
        category: "Science",
        difficulty: Difficulty::Easy,
    },
    Bundled {
        id: "3",
        prompt: "Who painted the Mona Lisa?",
        options: [
            "Vincent van Gogh",
            "Pablo Picasso",
            "Leonardo da Vinci",
            "Michelangelo",
        ],
        correct: 2,
        category: "Art",
        difficulty: Difficulty::Medium,
    },
    Bundled {
        id: "4",
        prompt: "What is the largest mammal in the world?",
        options: ["African Elephant", "Blue Whale", "Giraffe", "Hippopotamus"],
        correct: 1,
        category: "Science",
        difficulty: Difficulty::Easy,
    },
    Bundled {
        id: "5",
        prompt: "In which year did World War II end?",
        options: ["1944", "1945", "1946", "1947"],
        correct: 1,
        category: "History",
        difficulty: Difficulty::Medium,
    },
    Bundled {
        id: "6",
        prompt: "What is the chemical symbol for gold?",
        options: ["Go", "Gd", "Au", "Ag"],
        correct: 2,
        category: "Science",
        difficulty: Difficulty::Medium,
    },
    Bundled {
        id: "7",
        prompt: "Which Shakespeare play features the character Hamlet?",
        options: ["Romeo and Juliet", "Macbeth", "Hamlet", "Othello"],
        correct: 2,
        category: "Literature",
        difficulty: Difficulty::Easy,
    },
    Bundled {
        id: "8",
        prompt: "What is the smallest country in the world?",
        options: ["Monaco", "Nauru", "Vatican City", "San Marino"],
        correct: 2,
        category: "Geography",
        difficulty: Difficulty::Hard,
    },
];

/// The bundled list, first `count` entries. Options are not shuffled, so the
/// result is the same on every call.
#[must_use]
pub fn fallback_questions(count: usize) -> Vec<Question> {
    BUNDLED
        .iter()
        .take(count)
        .filter_map(|b| {
            QuestionDraft {
                id: b.id.to_owned(),
                prompt: b.prompt.to_owned(),
                options: b.options.iter().map(|o| (*o).to_owned()).collect(),
                correct_answer: b.correct,
                category: Some(b.category.to_owned()),
                difficulty: Some(b.difficulty),
            }
            .validate()
            .ok()
        })
        .collect()
}

/// Serves the bundled list, for offline play.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticQuestionSource;

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch(&self, count: usize) -> Result<Vec<Question>, QuestionSourceError> {
        Ok(fallback_questions(count))
    }
}
