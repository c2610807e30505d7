use httpsh_repl::{CancellationToken, ExecutionOutcome, OutputKind, ShellEvent};
use serde_json::json;
use url::Url;

use super::{FakeFetcher, Harness, SWAGGER_URL, sample_swagger};

#[tokio::test]
async fn builds_the_tree_from_a_swagger_document() {
    let mut harness = Harness::new(FakeFetcher::default().with_document(SWAGGER_URL, sample_swagger()));

    let outcome = harness.run(&format!("set swagger {SWAGGER_URL}")).await;

    assert_eq!(outcome, ExecutionOutcome::Completed);
    assert!(harness.output().is_empty());
    let structure = harness.state.structure().expect("tree installed");
    assert_eq!(structure.root().directory_names().collect::<Vec<_>>(), vec!["api"]);
    let api = structure.root().child("api").expect("api directory");
    assert_eq!(api.directory_names().collect::<Vec<_>>(), vec!["Employees", "Values"]);
    assert_eq!(harness.state.swagger_address().map(Url::as_str), Some(SWAGGER_URL));
    assert_eq!(harness.telemetry.events(), vec![ShellEvent::SetSwagger { succeeded: true }]);
}

#[tokio::test]
async fn builds_the_tree_from_an_openapi_v3_yaml_document() {
    let yaml = r#"
openapi: 3.0.1
info:
  title: Pets
  version: "1"
paths:
  /pets:
    get:
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
"#;
    let url = "http://localhost:5050/openapi.yaml";
    let mut harness = Harness::new(FakeFetcher::default().with_text(url, yaml));

    harness.run(&format!("set swagger {url}")).await;
    harness.run("cd pets").await;

    assert_eq!(harness.output_texts(), vec!["/pets    [GET|POST]"]);
}

#[tokio::test]
async fn two_sections_clear_the_description() {
    let mut harness = Harness::new(FakeFetcher::default().with_document(SWAGGER_URL, sample_swagger()));
    harness.run(&format!("set swagger {SWAGGER_URL}")).await;

    let outcome = harness.run("set swagger").await;

    assert_eq!(outcome, ExecutionOutcome::Completed);
    assert!(harness.state.structure().is_none());
    assert!(harness.state.swagger_address().is_none());
}

#[tokio::test]
async fn relative_address_without_base_is_an_error() {
    let mut harness = Harness::new(FakeFetcher::default());

    let outcome = harness.run("set swagger section3").await;

    assert_eq!(outcome, ExecutionOutcome::Failed);
    let output = harness.output();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].0, OutputKind::Error);
    assert!(harness.fetcher.requested().is_empty());
}

#[tokio::test]
async fn relative_address_resolves_against_base() {
    let mut harness = Harness::new(FakeFetcher::default().with_document(SWAGGER_URL, sample_swagger()));
    harness
        .state
        .set_base_address(Some(Url::parse("http://localhost:5050/").unwrap()));

    let outcome = harness.run("set swagger swagger/v1/swagger.json").await;

    assert_eq!(outcome, ExecutionOutcome::Completed);
    assert_eq!(harness.fetcher.requested(), vec![SWAGGER_URL]);
    assert!(harness.state.structure().is_some());
}

#[tokio::test]
async fn unsupported_document_is_reported_and_tracked() {
    let url = "http://localhost:5050/unknown.json";
    let mut harness = Harness::new(FakeFetcher::default().with_document(url, json!({ "info": { "title": "?" } })));

    let outcome = harness.run(&format!("set swagger {url}")).await;

    assert_eq!(outcome, ExecutionOutcome::Failed);
    let texts = harness.output_texts();
    assert!(texts[0].contains("not a supported OpenAPI/Swagger document"), "{texts:?}");
    assert!(harness.state.structure().is_none());
    assert_eq!(harness.telemetry.events(), vec![ShellEvent::SetSwagger { succeeded: false }]);
}

#[tokio::test]
async fn missing_document_keeps_the_previous_tree() {
    let mut harness = Harness::new(FakeFetcher::default().with_document(SWAGGER_URL, sample_swagger()));
    harness.run(&format!("set swagger {SWAGGER_URL}")).await;

    let outcome = harness.run("set swagger http://localhost:5050/missing.json").await;

    assert_eq!(outcome, ExecutionOutcome::Failed);
    assert!(harness.output_texts()[0].contains("404"));
    assert_eq!(harness.state.swagger_address().map(Url::as_str), Some(SWAGGER_URL));
}

#[tokio::test]
async fn cancelled_load_leaves_prior_tree_and_path() {
    let hanging = "http://localhost:5050/slow.json";
    let mut harness = Harness::new(
        FakeFetcher::default()
            .with_document(SWAGGER_URL, sample_swagger())
            .with_hanging(hanging),
    );
    harness.run(&format!("set swagger {SWAGGER_URL}")).await;
    harness.run("cd api").await;
    harness.output();

    let token = CancellationToken::new();
    token.cancel();
    let outcome = harness.run_with(&format!("set swagger {hanging}"), &token).await;

    assert_eq!(outcome, ExecutionOutcome::Cancelled);
    assert_eq!(harness.output_texts(), vec!["Operation cancelled."]);
    assert_eq!(harness.state.swagger_address().map(Url::as_str), Some(SWAGGER_URL));
    assert_eq!(harness.state.current_path(), "/api");
    assert!(harness.state.current_directory().is_some());
    assert_eq!(harness.telemetry.events(), vec![ShellEvent::SetSwagger { succeeded: true }]);
}

#[tokio::test]
async fn extra_sections_are_incomplete() {
    let mut harness = Harness::new(FakeFetcher::default());

    let outcome = harness.run("set swagger a b").await;

    assert_eq!(outcome, ExecutionOutcome::Incomplete);
    assert_eq!(harness.output_texts()[0], "Incomplete 'set swagger' command.");
}

#[test]
fn suggestions_come_from_every_command_in_registration_order() {
    let harness = Harness::new(FakeFetcher::default());

    assert_eq!(
        harness.dispatcher.suggest(&harness.state, "", 0),
        vec!["set", "set", "set", "cd", "ls", "dir", "run", "help", "exit"]
    );
    assert_eq!(harness.dispatcher.suggest(&harness.state, "set sw", 6), vec!["swagger"]);
    assert_eq!(harness.dispatcher.suggest(&harness.state, "set ", 4), vec!["base", "swagger", "header"]);
}
