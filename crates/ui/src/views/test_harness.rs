use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_clock;
use services::{
    AppServices, Clock, HighScoreService, QuestionSource, QuizConfig, QuizService,
    StaticQuestionSource,
};
use storage::repository::{InMemoryStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{HighScoresView, HomeView, QuizView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn high_scores(&self) -> Arc<HighScoreService> {
        self.services.high_scores()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Scores,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Scores => rsx! { HighScoresView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: Arc<InMemoryStore>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Drive pending tasks until `needle` shows up or the attempts run out.
    pub async fn render_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    /// Like `render_until`, bounded by wall time for views that wait on timers.
    pub async fn render_within(&mut self, needle: &str, limit: std::time::Duration) -> String {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    /// Keep the dom running for `span` without looking for anything.
    pub async fn idle_for(&mut self, span: std::time::Duration) {
        let deadline = tokio::time::Instant::now() + span;
        while tokio::time::Instant::now() < deadline {
            self.drive_async().await;
        }
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, question_count: usize) -> ViewHarness {
    setup_view_harness_with_source(view, question_count, Arc::new(StaticQuestionSource))
}

pub fn setup_view_harness_with_source(
    view: ViewKind,
    question_count: usize,
    source: Arc<dyn QuestionSource>,
) -> ViewHarness {
    setup_view_harness_on(view, question_count, source, fixed_clock(), InMemoryStore::new())
}

/// Full control over clock and store, for views whose deadlines must elapse.
pub fn setup_view_harness_on(
    view: ViewKind,
    question_count: usize,
    source: Arc<dyn QuestionSource>,
    clock: Clock,
    store: InMemoryStore,
) -> ViewHarness {
    let store = Arc::new(store);
    let storage = Storage::from_store(store.clone());
    let config = QuizConfig::default().with_question_count(question_count);
    let services = AppServices::with_source(&storage, clock, &config, source);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );

    ViewHarness { dom, store }
}
