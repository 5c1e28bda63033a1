//! Error responses.
//!
//! # Status Mapping
//! - Upstream failure on an API route → 500 `{"error": <message>}`
//! - Unknown entity or component → 404 `{"error": <message>}`
//! - Security data source failure → 502
//! - Unreadable request body → rejection status (400, 413, 415)
//! - Panic anywhere in a handler → 500 `{"error": "Something went wrong!"}`,
//!   with `message` only in development

use std::any::Any;

use axum::{
    body::Body,
    http::{header, Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tower_http::catch_panic::ResponseForPanic;

use crate::supply_chain::SupplyChainError;
use crate::upstream::UpstreamError;

pub const GENERIC_ERROR: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    SupplyChain(#[from] SupplyChainError),

    #[error("{message}")]
    Payload { status: StatusCode, message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SupplyChain(SupplyChainError::DataSource(_)) => StatusCode::BAD_GATEWAY,
            AppError::SupplyChain(_) => StatusCode::NOT_FOUND,
            AppError::Payload { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Body for unhandled failures.
pub fn internal_error_body(message: Option<&str>) -> serde_json::Value {
    match message {
        Some(m) => json!({ "error": GENERIC_ERROR, "message": m }),
        None => json!({ "error": GENERIC_ERROR }),
    }
}

/// Turns handler panics into the generic 500 JSON body.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    pub expose_details: bool,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> HttpResponse<Self::ResponseBody> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic".to_string()
        };
        tracing::error!(panic = %detail, "Unhandled error in request handler");

        let body = internal_error_body(self.expose_details.then_some(detail.as_str()));
        let mut response = HttpResponse::new(Body::from(body.to_string()));
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        response
    }
}
