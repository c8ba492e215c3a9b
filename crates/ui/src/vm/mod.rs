mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    HighScoreRowVm, LOW_TIME_SECS, OptionVm, QuestionVm, QuizIntent, ResultsVm, ReviewRowVm,
    TimerVm, key_intent, map_high_scores, option_letter, tone_class,
};
pub use time_fmt::{format_countdown, format_date, format_seconds};
