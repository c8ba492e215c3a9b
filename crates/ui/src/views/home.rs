use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let question_count = ctx.question_count();
    let high_scores = ctx.high_scores();

    let best = use_resource(move || {
        let high_scores = high_scores.clone();
        async move {
            let board = high_scores.load().await;
            Ok::<_, ViewError>(board.best().map(|entry| entry.percentage))
        }
    });
    let best = match view_state_from_resource(&best) {
        ViewState::Ready(best) => best,
        _ => None,
    };

    rsx! {
        div { class: "page home",
            div { class: "hero",
                h1 { "Quiz Master" }
                p { class: "muted",
                    "Test your knowledge with our interactive quiz featuring questions from various categories"
                }
            }
            div { class: "card",
                h2 { "Ready to Challenge Yourself?" }
                p { class: "muted",
                    "Answer {question_count} multiple-choice questions and see how well you score!"
                }
                div { class: "stats",
                    div { class: "stat",
                        div { class: "stat-value", "{question_count}" }
                        div { "Questions" }
                    }
                    div { class: "stat",
                        div { class: "stat-value", "Mixed" }
                        div { "Categories" }
                    }
                    if let Some(best) = best {
                        div { class: "stat",
                            div { class: "stat-value", "{best}%" }
                            div { "Best" }
                        }
                    }
                }
                Link { class: "button primary wide", to: Route::Quiz {}, "Start Quiz" }
            }
        }
    }
}
