use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::HighScoreTable;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HighScoreRowVm, map_high_scores};

#[component]
pub fn HighScoresView() -> Element {
    let ctx = use_context::<AppContext>();
    let high_scores = ctx.high_scores();
    let mut error = use_signal(|| None::<ViewError>);

    let mut resource = {
        let high_scores = high_scores.clone();
        use_resource(move || {
            let high_scores = high_scores.clone();
            async move {
                let board = high_scores.load().await;
                Ok::<Vec<HighScoreRowVm>, ViewError>(map_high_scores(&board, None))
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let on_clear = move |_: MouseEvent| {
        let high_scores = high_scores.clone();
        spawn(async move {
            match high_scores.clear().await {
                Ok(()) => error.set(None),
                Err(err) => {
                    tracing::warn!(error = %err, "could not clear high scores");
                    error.set(Some(ViewError::Storage));
                }
            }
            resource.restart();
        });
    };

    rsx! {
        div { class: "page",
            h2 { "High Scores" }
            if let Some(err) = error() {
                p { class: "notice", "{err.message()}" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "muted", "No high scores yet. Finish a quiz to get on the board." }
                    } else {
                        div { class: "card",
                            HighScoreTable { rows }
                            button { class: "button", onclick: on_clear, "Clear High Scores" }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice", "{err.message()}" }
                },
            }
        }
    }
}
