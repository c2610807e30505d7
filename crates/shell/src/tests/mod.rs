mod run_tests;
mod set_swagger_tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use httpsh_api::{DocumentFetcher, FetchError, StatusCode};
use httpsh_repl::{
    CancellationToken, CommandDispatcher, CommandHistory, ExecutionOutcome, OutputKind, ShellEvent, ShellState, TelemetrySink,
};
use serde_json::{Value, json};
use url::Url;

use crate::{HttpState, ShellConfig, default_dispatcher};

/// In-memory documents keyed by URL. Unknown URLs answer 404; URLs marked
/// as hanging only return once the request is cancelled.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    documents: HashMap<String, String>,
    hanging: Vec<String>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn with_document(mut self, url: &str, document: Value) -> Self {
        self.documents.insert(url.to_string(), document.to_string());
        self
    }

    pub(crate) fn with_text(mut self, url: &str, text: &str) -> Self {
        self.documents.insert(url.to_string(), text.to_string());
        self
    }

    pub(crate) fn with_hanging(mut self, url: &str) -> Self {
        self.hanging.push(url.to_string());
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for FakeFetcher {
    async fn fetch(&self, url: &Url, cancellation: &CancellationToken) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        if self.hanging.iter().any(|hanging| hanging == url.as_str()) {
            cancellation.cancelled().await;
            return Err(FetchError::Cancelled { url: url.to_string() });
        }
        self.documents.get(url.as_str()).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: StatusCode::NOT_FOUND,
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingTelemetry {
    events: Mutex<Vec<ShellEvent>>,
}

impl RecordingTelemetry {
    pub(crate) fn events(&self) -> Vec<ShellEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn track_event(&self, event: ShellEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A shell wired to the fakes above.
pub(crate) struct Harness {
    pub(crate) dispatcher: CommandDispatcher<HttpState>,
    pub(crate) shell: ShellState,
    pub(crate) state: HttpState,
    pub(crate) fetcher: Arc<FakeFetcher>,
    pub(crate) telemetry: Arc<RecordingTelemetry>,
}

impl Harness {
    pub(crate) fn new(fetcher: FakeFetcher) -> Self {
        let fetcher = Arc::new(fetcher);
        let telemetry = Arc::new(RecordingTelemetry::default());
        let config = ShellConfig::default();
        let shell = ShellState::new(CommandHistory::new(config.history_limit));
        let state = HttpState::new(config, fetcher.clone(), telemetry.clone());
        Self {
            dispatcher: default_dispatcher(),
            shell,
            state,
            fetcher,
            telemetry,
        }
    }

    pub(crate) async fn run(&mut self, line: &str) -> ExecutionOutcome {
        self.run_with(line, &CancellationToken::new()).await
    }

    pub(crate) async fn run_with(&mut self, line: &str, cancellation: &CancellationToken) -> ExecutionOutcome {
        self.dispatcher
            .execute_line(line, &mut self.shell, &mut self.state, cancellation)
            .await
    }

    /// Takes the output written so far.
    pub(crate) fn output(&mut self) -> Vec<(OutputKind, String)> {
        self.shell
            .output
            .drain()
            .into_iter()
            .map(|line| (line.kind, line.text))
            .collect()
    }

    pub(crate) fn output_texts(&mut self) -> Vec<String> {
        self.output().into_iter().map(|(_, text)| text).collect()
    }
}

pub(crate) const SWAGGER_URL: &str = "http://localhost:5050/swagger/v1/swagger.json";

/// Swagger 2.0 description of a small sample API.
pub(crate) fn sample_swagger() -> Value {
    json!({
        "swagger": "2.0",
        "info": { "title": "Sample", "version": "v1" },
        "paths": {
            "/api/Employees": {
                "get": { "operationId": "GetEmployees", "consumes": [], "parameters": [] },
                "post": {
                    "consumes": ["application/json", "text/json"],
                    "parameters": [{ "name": "employee", "in": "body", "schema": { "type": "object" } }]
                }
            },
            "/api/Values": {
                "get": { "parameters": [] },
                "post": {
                    "consumes": ["application/json"],
                    "parameters": [{ "name": "value", "in": "body", "schema": { "type": "string" } }]
                }
            }
        }
    })
}
