//! Presentational pieces of the quiz screens. They take view models only and
//! report clicks through handlers, so they render the same under SSR.

use dioxus::prelude::*;

use crate::vm::{HighScoreRowVm, QuestionVm, ResultsVm, ReviewRowVm, TimerVm};

#[component]
pub fn QuestionCard(vm: QuestionVm, on_select: EventHandler<usize>) -> Element {
    rsx! {
        div { class: "card question",
            div { class: "badges",
                span { class: "badge", "Question {vm.number}" }
                if let Some(category) = vm.category.as_deref() {
                    span { class: "badge outline", "{category}" }
                }
                if let Some(difficulty) = vm.difficulty {
                    span { class: "badge outline {difficulty}", "{difficulty}" }
                }
            }
            h2 { id: "question-title", "{vm.prompt}" }
            div { class: "options", role: "radiogroup", "aria-labelledby": "question-title",
                for option in vm.options {
                    button {
                        key: "{option.index}",
                        class: if option.selected { "option selected" } else { "option" },
                        role: "radio",
                        "aria-checked": "{option.selected}",
                        disabled: vm.submitting,
                        onclick: move |_| on_select.call(option.index),
                        span { class: "option-letter", "{option.letter}" }
                        span { class: "option-text", "{option.text}" }
                    }
                }
            }
            if let Some(label) = vm.selected_label.as_deref() {
                p { class: "muted center", "aria-live": "polite", "{label}" }
            }
        }
    }
}

#[component]
pub fn TimerBar(vm: TimerVm) -> Element {
    let low = if vm.is_low { " low" } else { "" };
    rsx! {
        div { class: "timer{low}",
            div { class: "timer-row",
                span { "Time Remaining" }
                span { class: "timer-value", "{vm.label}" }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {vm.elapsed_percent}%" }
            }
        }
    }
}

#[component]
pub fn HighScoreTable(rows: Vec<HighScoreRowVm>) -> Element {
    rsx! {
        ol { class: "high-scores",
            for row in rows {
                li {
                    key: "{row.rank}",
                    class: if row.current { "high-score current" } else { "high-score" },
                    span { class: "rank", "#{row.rank}" }
                    div { class: "grow",
                        div { class: "strong", "{row.percentage_label}" }
                        div { class: "muted small", "{row.date_label}" }
                    }
                    div { class: "right",
                        div { "{row.score_label}" }
                        div { class: "muted small", "{row.time_label}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    let verdict = if row.is_correct { "correct" } else { "incorrect" };
    rsx! {
        li { class: "review {verdict}",
            h3 { "{row.number}. {row.prompt}" }
            p {
                span { class: "muted", "Your answer: " }
                span { class: "badge {verdict}", "{row.your_answer}" }
            }
            if let Some(correct) = row.correct_answer.as_deref() {
                p {
                    span { class: "muted", "Correct answer: " }
                    span { class: "badge correct", "{correct}" }
                }
            }
        }
    }
}

#[component]
pub fn ResultsPanel(vm: ResultsVm, on_restart: EventHandler<()>, on_exit: EventHandler<()>) -> Element {
    let headline = if vm.is_new_high_score { "headline new-high" } else { "headline" };
    rsx! {
        div { class: "page results",
            div { class: "card center",
                h2 { class: "{headline}", "{vm.title}" }
                div { class: "score {vm.tone_class}", "{vm.score_label}" }
                div { class: "percentage {vm.tone_class}", "{vm.percentage_label}" }
                p { class: "muted", "{vm.message}" }
                div { class: "stats",
                    div { class: "stat",
                        div { class: "stat-value", "{vm.time_taken_label}" }
                        div { "Time Taken" }
                    }
                    div { class: "stat",
                        div { class: "stat-value", "{vm.incorrect}" }
                        div { "Incorrect" }
                    }
                }
                if !vm.saved {
                    p { class: "notice", "Your score could not be saved this time." }
                }
                div { class: "actions",
                    button { class: "button primary", onclick: move |_| on_restart.call(()), "Try Again" }
                    button { class: "button", onclick: move |_| on_exit.call(()), "Home" }
                }
            }

            if !vm.high_scores.is_empty() {
                div { class: "card",
                    h3 { "High Scores" }
                    HighScoreTable { rows: vm.high_scores.clone() }
                }
            }

            div { class: "card",
                h3 { "Review Your Answers" }
                ul { class: "reviews",
                    for row in vm.reviews {
                        ReviewRow { key: "{row.number}", row }
                    }
                }
            }
        }
    }
}
