mod components;
mod home;
mod quiz;
mod scores;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use components::{HighScoreTable, QuestionCard, ResultsPanel, TimerBar};
pub use home::HomeView;
pub use quiz::QuizView;
pub use scores::HighScoresView;
pub use state::{ViewError, ViewState, view_state_from_resource};
