use super::test_harness::{PROMPT, ViewKind, WELCOME_TEXT, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_welcome_text() {
    let mut harness = setup_view_harness(ViewKind::Home, false);
    harness.rebuild();

    let html = harness.drive_until(WELCOME_TEXT).await;
    assert!(html.contains(WELCOME_TEXT), "missing welcome text in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_generic_error() {
    let mut harness = setup_view_harness(ViewKind::Home, true);
    harness.rebuild();

    let message = "Something went wrong. Please try again.";
    let html = harness.drive_until(message).await;
    assert!(html.contains(message), "missing error message in {html}");
    assert!(!html.contains(WELCOME_TEXT), "unexpected welcome text in {html}");
    assert!(html.contains("Start"), "start button should stay available in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_initial_stats() {
    let mut harness = setup_view_harness(ViewKind::Game, false);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Time Left: 1:00"), "missing timer in {html}");
    assert!(html.contains("Streak: 0"), "missing streak in {html}");
    assert!(html.contains("High Score: 0"), "missing high score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Game, false);
    harness.rebuild();

    let html = harness.drive_until(PROMPT).await;
    assert!(html.contains(PROMPT), "missing question in {html}");
    for option in ["Paris", "Rome", "Madrid", "Berlin"] {
        assert!(html.contains(option), "missing option {option} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_reports_failed_fetch() {
    let mut harness = setup_view_harness(ViewKind::Game, true);
    harness.rebuild();

    let message = "Something went wrong. Please try again.";
    let html = harness.drive_until(message).await;
    assert!(html.contains(message), "missing error message in {html}");
    assert!(html.contains("Time Left:"), "timer should stay visible in {html}");
}
