//! HTTP client for the backend API.
//!
//! # Responsibilities
//! - Build upstream URLs from the configured base URL
//! - Enforce a per-call timeout
//! - Propagate the inbound request id
//! - Classify failures (timeout, transport, status, decode)

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, StatusCode};
use thiserror::Error;
use tokio::time::timeout;

use crate::config::BackendConfig;
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;

/// Errors that can occur while calling the backend.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The call did not finish before its deadline.
    #[error("timeout of {0}ms exceeded")]
    Timeout(u128),

    /// The backend answered with a non-2xx status.
    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: Bytes },

    /// Connection refused, DNS failure, reset, ...
    #[error("{0}")]
    Transport(String),

    /// The backend answered 2xx with a body that is not JSON.
    #[error("Invalid JSON from backend: {0}")]
    Decode(String),

    /// Client construction failed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl UpstreamError {
    fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::Client(_) => "client",
        }
    }
}

/// Buffered backend response forwarded to the browser.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, UpstreamError> {
        serde_json::from_slice(&self.body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// Client for the backend API, cheap to clone.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and parse the JSON body.
    pub async fn get_json(
        &self,
        path: &str,
        deadline: Duration,
        request_id: Option<&str>,
    ) -> Result<serde_json::Value, UpstreamError> {
        self.send(Method::GET, path, None, request_id, deadline)
            .await?
            .json()
    }

    /// Forward a request and return the raw response when it is 2xx.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        request_id: Option<&str>,
        deadline: Duration,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let start = Instant::now();
        let result = timeout(deadline, self.execute(method.clone(), path, body, request_id))
            .await
            .unwrap_or_else(|_| Err(UpstreamError::Timeout(deadline.as_millis())));

        match &result {
            Ok(response) => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    status = %response.status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call succeeded"
                );
                metrics::record_upstream(path, "ok", start);
            }
            Err(e) => {
                tracing::warn!(method = %method, path = %path, error = %e, "Upstream call failed");
                metrics::record_upstream(path, e.outcome(), start);
            }
        }

        result
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(describe(&e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(describe(&e)))?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Flatten a reqwest error and its sources into one line.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
