use std::env;

pub const DEFAULT_QUESTION_COUNT: usize = 8;
pub const DEFAULT_TRIVIA_BASE_URL: &str = "https://opentdb.com";

/// Knobs for building a quiz, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub question_count: usize,
    pub trivia_base_url: String,
    /// Skip the network and serve the bundled list.
    pub offline: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            trivia_base_url: DEFAULT_TRIVIA_BASE_URL.to_owned(),
            offline: false,
        }
    }
}

impl QuizConfig {
    /// Defaults overridden by `QUIZ_QUESTION_COUNT` and `QUIZ_TRIVIA_URL`.
    ///
    /// Unparseable or zero counts and blank URLs are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(count) = lookup("QUIZ_QUESTION_COUNT")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|count| *count > 0)
        {
            config.question_count = count;
        }
        if let Some(url) = lookup("QUIZ_TRIVIA_URL")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
        {
            config.trivia_base_url = url;
        }
        config
    }

    #[must_use]
    pub fn with_question_count(mut self, question_count: usize) -> Self {
        self.question_count = question_count.max(1);
        self
    }

    #[must_use]
    pub fn with_trivia_base_url(mut self, url: impl Into<String>) -> Self {
        self.trivia_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let config = QuizConfig::from_lookup(|name| match name {
            "QUIZ_QUESTION_COUNT" => Some(" 5 ".into()),
            "QUIZ_TRIVIA_URL" => Some("http://localhost:8080".into()),
            _ => None,
        });
        assert_eq!(config.question_count, 5);
        assert_eq!(config.trivia_base_url, "http://localhost:8080");
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = QuizConfig::from_lookup(|name| match name {
            "QUIZ_QUESTION_COUNT" => Some("0".into()),
            "QUIZ_TRIVIA_URL" => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config, QuizConfig::default());
    }

    #[test]
    fn builder_clamps_count() {
        assert_eq!(QuizConfig::default().with_question_count(0).question_count, 1);
        assert!(QuizConfig::default().with_offline(true).offline);
    }
}
