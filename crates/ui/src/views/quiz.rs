use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{QuizController, QuizReport, TickOutcome};
use quiz_core::model::QuizSettings;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{QuestionCard, ResultsPanel, TimerBar};
use crate::vm::{QuestionVm, QuizIntent, ResultsVm, TimerVm, key_intent};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let clock = ctx.clock();
    let quiz = ctx.quiz();

    let mut controller = use_signal(|| QuizController::new(QuizSettings::default()));
    let mut report = use_signal(|| None::<QuizReport>);
    let mut show_settings = use_signal(|| false);
    let mut now = use_signal(|| clock.now());

    // Restarting this future drops an in-flight fetch; the load ticket covers
    // anything that slips through.
    let mut loader = {
        let quiz = quiz.clone();
        use_future(move || {
            let quiz = quiz.clone();
            async move {
                report.set(None);
                let ticket = controller.write().begin_loading();
                let settings = quiz.settings().load().await;
                let fetched = quiz.load_questions().await;

                let started_at = quiz.clock().now();
                now.set(started_at);
                let mut guard = controller.write();
                guard.set_settings(settings, started_at);
                if let Err(err) = quiz.begin(&mut guard, ticket, fetched) {
                    tracing::debug!(error = %err, "question load dropped");
                }
            }
        })
    };

    // Drives both deadlines. Dropped with the view, so nothing fires after exit.
    {
        let quiz = quiz.clone();
        use_future(move || {
            let quiz = quiz.clone();
            async move {
                loop {
                    tokio::time::sleep(TICK_INTERVAL).await;
                    let armed = {
                        let guard = controller.peek();
                        guard.has_pending_advance() || guard.timer_deadline().is_some()
                    };
                    if !armed {
                        continue;
                    }

                    let at = clock.now();
                    now.set(at);
                    let outcome = controller.write().tick(at);
                    if let TickOutcome::Completed { .. } = outcome {
                        let session = controller.peek().session().clone();
                        match quiz.finish(&session).await {
                            Ok(finished) => report.set(Some(finished)),
                            Err(err) => tracing::warn!(error = %err, "could not score quiz"),
                        }
                    }
                }
            }
        });
    }

    let dispatch = use_callback(move |intent: QuizIntent| {
        let at = clock.now();
        let result = match intent {
            QuizIntent::Select(index) => controller.write().select_answer(index),
            QuizIntent::Next => {
                if !controller.peek().can_advance() {
                    return;
                }
                controller.write().advance(at)
            }
            QuizIntent::Previous => controller.write().retreat(at).map(|_| ()),
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, ?intent, "input ignored");
        }
        now.set(at);
    });

    let on_timer_toggle = {
        let quiz = quiz.clone();
        use_callback(move |enabled: bool| {
            let quiz = quiz.clone();
            spawn(async move {
                let settings = match quiz.set_timer_enabled(enabled).await {
                    Ok(settings) => settings,
                    Err(err) => {
                        tracing::warn!(error = %err, "could not save settings");
                        controller.peek().settings().with_timer_enabled(enabled)
                    }
                };
                let at = clock.now();
                now.set(at);
                controller.write().set_settings(settings, at);
            });
        })
    };

    let on_key = move |evt: KeyboardEvent| {
        if let Some(intent) = key_intent(&evt.data.key()) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    };

    let on_restart = move |()| loader.restart();
    let on_exit = move |()| {
        navigator.push(Route::Home {});
    };

    if let Some(finished) = report.read().as_ref() {
        let vm = ResultsVm::from_report(finished);
        return rsx! {
            ResultsPanel { vm, on_restart, on_exit }
        };
    }

    let guard = controller.read();
    let session = guard.session();
    if session.is_loading() {
        return rsx! {
            div { class: "page center",
                div { class: "card center",
                    div { class: "spinner" }
                    p { class: "muted", "Loading quiz questions..." }
                }
            }
        };
    }
    let Some(question) = QuestionVm::from_controller(&guard) else {
        return rsx! {
            div { class: "page center",
                p { class: "muted", "Scoring your answers..." }
            }
        };
    };
    let timer = TimerVm::from_controller(&guard, now());
    let settings = guard.settings();
    let timer_enabled = settings.timer_enabled();
    let question_time = settings.question_time_secs();
    let fallback = guard.is_fallback();
    drop(guard);

    let counter = question.counter_label();
    let next_label = question.next_label();
    let progress = question.progress_percent;
    let can_advance = question.can_advance;
    let can_retreat = question.can_retreat;

    rsx! {
        div { class: "page quiz", tabindex: "0", autofocus: true, onkeydown: on_key,
            div { class: "quiz-header",
                button { class: "button ghost", onclick: move |_| on_exit(()), "Exit Quiz" }
                div { class: "quiz-header-right",
                    button {
                        class: "button ghost",
                        "aria-label": "Toggle settings",
                        onclick: move |_| show_settings.toggle(),
                        "Settings"
                    }
                    span { class: "muted", "{counter}" }
                }
            }

            if show_settings() {
                div { class: "card settings",
                    label { r#for: "timer-toggle",
                        "Enable Timer ({question_time}s per question)"
                    }
                    input {
                        id: "timer-toggle",
                        r#type: "checkbox",
                        checked: timer_enabled,
                        onchange: move |evt: FormEvent| on_timer_toggle.call(evt.checked()),
                    }
                }
            }

            if fallback {
                p { class: "notice",
                    "Couldn't reach the question service. Playing the built-in questions instead."
                }
            }

            div { class: "progress-block",
                div { class: "progress",
                    div { class: "progress-fill", style: "width: {progress}%" }
                }
                div { class: "muted small center", "{progress}% Complete" }
            }

            if let Some(timer) = timer {
                TimerBar { vm: timer }
            }

            QuestionCard {
                vm: question,
                on_select: move |index| dispatch.call(QuizIntent::Select(index)),
            }

            div { class: "muted small center hints",
                div { "Use number keys 1-9 to select answers" }
                div { "Use arrow keys or Enter to navigate" }
            }

            div { class: "nav",
                button {
                    class: "button",
                    disabled: !can_retreat,
                    onclick: move |_| dispatch.call(QuizIntent::Previous),
                    "Previous"
                }
                button {
                    class: "button primary",
                    disabled: !can_advance,
                    onclick: move |_| dispatch.call(QuizIntent::Next),
                    "{next_label}"
                }
            }
        }
    }
}
