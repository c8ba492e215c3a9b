use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::{Question, QuestionDraft};

use super::{QuestionSource, assemble_options};
use crate::config::DEFAULT_TRIVIA_BASE_URL;
use crate::error::QuestionSourceError;

/// Upper bound for one request, connect included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Open Trivia Database `api.php` endpoint.
#[derive(Clone, Debug)]
pub struct OpenTriviaSource {
    client: Client,
    base_url: String,
    seed: Option<u64>,
}

impl Default for OpenTriviaSource {
    fn default() -> Self {
        Self::new(DEFAULT_TRIVIA_BASE_URL)
    }
}

impl OpenTriviaSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            seed: None,
        }
    }

    /// Shuffle options with a fixed seed instead of thread randomness.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn request_url(&self, count: usize) -> String {
        format!(
            "{}/api.php?amount={count}&type=multiple&encode=url3986",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaSource {
    async fn fetch(&self, count: usize) -> Result<Vec<Question>, QuestionSourceError> {
        let response = self.client.get(self.request_url(count)).send().await?;
        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        match self.seed {
            Some(seed) => body.into_questions(&mut StdRng::seed_from_u64(seed)),
            None => body.into_questions(&mut rand::rng()),
        }
    }
}

/// Response envelope. `response_code` 0 means success.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaResponse {
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<TriviaQuestion>,
}

/// One percent-encoded question as sent on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaQuestion {
    pub category: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl TriviaResponse {
    /// Decode and validate every result, shuffling options with `rng`.
    ///
    /// # Errors
    ///
    /// Returns `ResponseCode` for a non-zero code, `Empty` for no results, and
    /// `Decode`/`Invalid` when a question cannot be decoded or validated.
    pub fn into_questions<R: Rng + ?Sized>(
        self,
        rng: &mut R,
    ) -> Result<Vec<Question>, QuestionSourceError> {
        if self.response_code != 0 {
            return Err(QuestionSourceError::ResponseCode(self.response_code));
        }
        if self.results.is_empty() {
            return Err(QuestionSourceError::Empty);
        }

        self.results
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_question(index, rng))
            .collect()
    }
}

impl TriviaQuestion {
    fn into_question<R: Rng + ?Sized>(
        self,
        index: usize,
        rng: &mut R,
    ) -> Result<Question, QuestionSourceError> {
        let correct = decode("correct_answer", &self.correct_answer)?;
        let incorrect = self
            .incorrect_answers
            .iter()
            .map(|raw| decode("incorrect_answers", raw))
            .collect::<Result<Vec<_>, _>>()?;
        let (options, correct_answer) = assemble_options(correct, incorrect, rng);

        let draft = QuestionDraft {
            id: format!("api-{index}"),
            prompt: decode("question", &self.question)?,
            options,
            correct_answer,
            category: Some(decode("category", &self.category)?),
            difficulty: decode("difficulty", &self.difficulty)?.parse().ok(),
        };
        Ok(draft.validate()?)
    }
}

fn decode(field: &'static str, raw: &str) -> Result<String, QuestionSourceError> {
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| QuestionSourceError::Decode {
            field,
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Difficulty;

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "medium",
                "category": "Entertainment%3A%20Books",
                "question": "Who%20wrote%20%22Dune%22%3F",
                "correct_answer": "Frank%20Herbert",
                "incorrect_answers": ["Isaac%20Asimov", "Arthur%20C.%20Clarke", "Ursula%20K.%20Le%20Guin"]
            },
            {
                "type": "multiple",
                "difficulty": "easy",
                "category": "Science%20%26%20Nature",
                "question": "What%20is%20H2O%3F",
                "correct_answer": "Water",
                "incorrect_answers": ["Salt", "Hydrogen", "Oxygen"]
            }
        ]
    }"#;

    fn parse(json: &str) -> TriviaResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_and_keeps_correct_index() {
        let questions = parse(SAMPLE)
            .into_questions(&mut StdRng::seed_from_u64(11))
            .unwrap();
        assert_eq!(questions.len(), 2);

        let dune = &questions[0];
        assert_eq!(dune.id().as_str(), "api-0");
        assert_eq!(dune.prompt(), "Who wrote \"Dune\"?");
        assert_eq!(dune.category(), Some("Entertainment: Books"));
        assert_eq!(dune.difficulty(), Some(Difficulty::Medium));
        assert_eq!(dune.correct_option(), "Frank Herbert");
        assert_eq!(dune.option_count(), 4);
        assert!(dune.options().iter().any(|o| o == "Arthur C. Clarke"));

        assert_eq!(questions[1].category(), Some("Science & Nature"));
        assert_eq!(questions[1].correct_option(), "Water");
    }

    #[test]
    fn non_zero_code_is_an_error() {
        let err = parse(r#"{"response_code": 1, "results": []}"#)
            .into_questions(&mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, QuestionSourceError::ResponseCode(1)));
    }

    #[test]
    fn empty_results_are_an_error() {
        let err = parse(r#"{"response_code": 0}"#)
            .into_questions(&mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, QuestionSourceError::Empty));
    }

    #[test]
    fn invalid_percent_encoding_is_a_decode_error() {
        let json = r#"{"response_code":0,"results":[{"type":"multiple","difficulty":"easy","category":"x","question":"bad%FF","correct_answer":"a","incorrect_answers":["b"]}]}"#;
        let err = parse(json)
            .into_questions(&mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, QuestionSourceError::Decode { field: "question", .. }));
    }

    #[test]
    fn unknown_difficulty_is_dropped() {
        let json = r#"{"response_code":0,"results":[{"type":"multiple","difficulty":"brutal","category":"x","question":"q","correct_answer":"a","incorrect_answers":["b"]}]}"#;
        let questions = parse(json)
            .into_questions(&mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(questions[0].difficulty(), None);
    }

    #[test]
    fn request_url_carries_count_and_encoding() {
        let source = OpenTriviaSource::new("https://opentdb.com/");
        assert_eq!(
            source.request_url(8),
            "https://opentdb.com/api.php?amount=8&type=multiple&encode=url3986"
        );
    }
}
