use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{HighScoreBoard, Question};
use services::{Clock, QuestionSource, QuestionSourceError, StaticQuestionSource};
use storage::keys;
use storage::repository::{InMemoryStore, KeyValueStore};

use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_on, setup_view_harness_with_source,
};

const ONE_SCORE: &str =
    r#"[{"score":6,"total":8,"percentage":75,"date":"2023-11-14","timeTaken":42}]"#;

struct DownSource;

#[async_trait]
impl QuestionSource for DownSource {
    async fn fetch(&self, _count: usize) -> Result<Vec<Question>, QuestionSourceError> {
        Err(QuestionSourceError::Empty)
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_question_count() {
    let mut harness = setup_view_harness(ViewKind::Home, 3);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quiz Master"), "missing title in {html}");
    assert!(
        html.contains("Answer 3 multiple-choice questions"),
        "missing count in {html}"
    );
    assert!(html.contains("Start Quiz"), "missing start link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_best_score() {
    let mut harness = setup_view_harness(ViewKind::Home, 8);
    harness
        .store
        .set(keys::HIGH_SCORES, ONE_SCORE)
        .await
        .expect("seed scores");
    harness.rebuild();
    let html = harness.render_until("Best").await;
    assert!(html.contains("75%"), "missing best score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_loads_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, 3);
    harness.rebuild();
    let html = harness.render_until("Question 1 of 3").await;
    assert!(html.contains("Question 1 of 3"), "missing counter in {html}");
    assert!(html.contains("Previous"), "missing nav in {html}");
    assert!(!html.contains("built-in questions"), "unexpected notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_announces_fallback() {
    let mut harness = setup_view_harness_with_source(ViewKind::Quiz, 2, Arc::new(DownSource));
    harness.rebuild();
    let html = harness.render_until("built-in questions").await;
    assert!(html.contains("built-in questions"), "missing notice in {html}");
    assert!(html.contains("Question 1 of 2"), "missing counter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scores_view_smoke_renders_empty_and_filled() {
    let mut harness = setup_view_harness(ViewKind::Scores, 8);
    harness.rebuild();
    let html = harness.render_until("No high scores yet").await;
    assert!(html.contains("No high scores yet"), "missing empty state in {html}");

    let mut harness = setup_view_harness(ViewKind::Scores, 8);
    harness
        .store
        .set(keys::HIGH_SCORES, ONE_SCORE)
        .await
        .expect("seed scores");
    harness.rebuild();
    let html = harness.render_until("6/8").await;
    assert!(html.contains("6/8"), "missing row in {html}");
    assert!(html.contains("Nov 14, 2023"), "missing date in {html}");
    assert!(html.contains("Clear High Scores"));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_records_a_timed_out_run_once() {
    let store = InMemoryStore::new();
    store
        .set(keys::SETTINGS, r#"{"timerEnabled":true,"questionTime":1}"#)
        .await
        .expect("seed settings");
    let mut harness = setup_view_harness_on(
        ViewKind::Quiz,
        2,
        Arc::new(StaticQuestionSource),
        Clock::system(),
        store,
    );
    harness.rebuild();

    let html = harness
        .render_within("Try Again", Duration::from_secs(10))
        .await;
    assert!(html.contains("Try Again"), "results never rendered: {html}");
    assert!(html.contains("Review Your Answers"), "missing review in {html}");

    harness.idle_for(Duration::from_millis(500)).await;
    let raw = harness
        .store
        .get(keys::HIGH_SCORES)
        .await
        .expect("read scores")
        .expect("scores recorded");
    let board: HighScoreBoard = serde_json::from_str(&raw).expect("board json");
    assert_eq!(board.len(), 1, "unexpected board {raw}");
    assert_eq!(board.entries()[0].score, 0);
    assert_eq!(board.entries()[0].total, 2);
}
