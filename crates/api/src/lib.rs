//! Fetching of API description documents.
//!
//! The shell only ever needs the text of a document at a URL, so the network
//! surface is one trait, [`DocumentFetcher`]. [`HttpDocumentFetcher`] is the
//! reqwest-backed implementation used by the binary; tests substitute an
//! in-memory one.
//!
//! Every fetch races a [`CancellationToken`] so an interrupted `set swagger`
//! returns immediately instead of waiting for the request timeout.

use std::time::Duration;

use async_trait::async_trait;
use httpsh_util::redact_sensitive;
use reqwest::{Client, header};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

pub use reqwest::StatusCode;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced while fetching a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connection, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    /// The cancellation token fired before the response arrived.
    #[error("request to {url} was cancelled")]
    Cancelled { url: String },
    /// Building the HTTP client failed.
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// `true` for 404 responses, which discovery treats as "try the next
    /// location" rather than a failure worth reporting.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Retrieves the body of a document by URL.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, cancellation: &CancellationToken) -> Result<String, FetchError>;
}

/// [`DocumentFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpDocumentFetcher {
    http: Client,
}

impl HttpDocumentFetcher {
    /// Builds a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json, application/yaml;q=0.9, */*;q=0.8"),
        );

        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(format!("httpsh/{}; {}", env!("CARGO_PKG_VERSION"), std::env::consts::OS))
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http })
    }

    async fn fetch_uncancelled(&self, url: &Url) -> Result<String, FetchError> {
        let display_url = redact_sensitive(url.as_str());
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: display_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: display_url, status });
        }

        response.text().await.map_err(|source| FetchError::Request { url: display_url, source })
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(&self, url: &Url, cancellation: &CancellationToken) -> Result<String, FetchError> {
        let display_url = redact_sensitive(url.as_str());
        debug!(url = %display_url, "fetching document");

        let result = tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(FetchError::Cancelled { url: display_url.clone() }),
            result = self.fetch_uncancelled(url) => result,
        };

        match &result {
            Ok(body) => debug!(url = %display_url, bytes = body.len(), "fetched document"),
            Err(error) if error.is_not_found() || error.is_cancelled() => {
                debug!(url = %display_url, error = %error, "document not fetched")
            }
            Err(error) => warn!(url = %display_url, error = %error, "document fetch failed"),
        }
        result
    }
}
