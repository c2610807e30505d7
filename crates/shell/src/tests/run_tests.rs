use std::fs;

use httpsh_repl::{CancellationToken, ExecutionOutcome, ShellEvent};
use tempfile::TempDir;

use super::{FakeFetcher, Harness, SWAGGER_URL, sample_swagger};

fn script(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("script.txt");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[tokio::test]
async fn replays_each_line_with_history_suspended() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(
        &dir,
        "set base http://localhost:5050\ncd api\n\nset header Accept application/json\n",
    );
    let mut harness = Harness::new(FakeFetcher::default().with_document(SWAGGER_URL, sample_swagger()));

    let outcome = harness.run(&format!("run {path}")).await;

    assert_eq!(outcome, ExecutionOutcome::Completed);
    assert_eq!(
        harness.output_texts(),
        vec![
            "(Disconnected)~ set base http://localhost:5050".to_string(),
            format!("Using swagger metadata from {SWAGGER_URL}"),
            "http://localhost:5050/~ cd api".to_string(),
            "/api    []".to_string(),
            "http://localhost:5050/api~ set header Accept application/json".to_string(),
        ]
    );
    assert_eq!(
        harness.shell.history.entries().collect::<Vec<_>>(),
        vec![format!("run {path}")]
    );
    assert!(!harness.shell.history.is_suspended());
    assert_eq!(harness.state.current_path(), "/api");
    assert!(harness.state.headers.get("accept").is_some());
    assert_eq!(harness.telemetry.events().last(), Some(&ShellEvent::Run { line_count: 3 }));
}

#[tokio::test]
async fn failing_lines_do_not_stop_the_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "frobnicate\ncd api\n");
    let mut harness = Harness::new(FakeFetcher::default());

    let outcome = harness.run(&format!("run {path}")).await;

    assert_eq!(outcome, ExecutionOutcome::Completed);
    let texts = harness.output_texts();
    assert!(texts.contains(&"No matching command found".to_string()), "{texts:?}");
    assert_eq!(texts.last().map(String::as_str), Some("/api    []"));
}

#[tokio::test]
async fn cancellation_stops_the_script() {
    let dir = tempfile::tempdir().unwrap();
    let hanging = "http://localhost:5050/slow.json";
    let path = script(&dir, &format!("set swagger {hanging}\ncd api\n"));
    let mut harness = Harness::new(FakeFetcher::default().with_hanging(hanging));

    let token = CancellationToken::new();
    token.cancel();
    let outcome = harness.run_with(&format!("run {path}"), &token).await;

    assert_eq!(outcome, ExecutionOutcome::Cancelled);
    assert_eq!(harness.state.current_path(), "/");
    assert!(!harness.shell.history.is_suspended());
    assert_eq!(harness.telemetry.events(), vec![ShellEvent::Run { line_count: 1 }]);
}

#[tokio::test]
async fn missing_script_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let mut harness = Harness::new(FakeFetcher::default());

    let outcome = harness.run(&format!("run {}", path.display())).await;

    assert_eq!(outcome, ExecutionOutcome::Failed);
    assert!(harness.output_texts()[0].starts_with("could not read script"));
    assert!(harness.telemetry.events().is_empty());
}

#[tokio::test]
async fn run_without_a_path_is_incomplete() {
    let mut harness = Harness::new(FakeFetcher::default());

    assert_eq!(harness.run("run").await, ExecutionOutcome::Incomplete);
}
