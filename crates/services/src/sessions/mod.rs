mod controller;
mod service;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use controller::{ADVANCE_DELAY_MS, LoadTicket, QuizController, TickOutcome};
pub use service::{QuizReport, QuizService};
