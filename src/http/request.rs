//! Request identification and body extraction.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Read the request ID back for logging and upstream propagation
//! - Accept JSON or urlencoded form bodies for forwarded writes
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Form bodies become flat JSON objects of strings before forwarding

use std::collections::BTreeMap;

use axum::{
    extract::{FromRequest, Request},
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    Form,
};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::error::AppError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates `x-request-id` values for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Access to the request ID stored in headers.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<&str> {
        self.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
    }
}

/// Body of a forwarded write: JSON as sent, or a form converted to JSON.
///
/// An empty body becomes `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(fields) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::Payload {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            let object = fields
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            return Ok(Self(Value::Object(object)));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Payload {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Default::default())));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::Payload {
                status: axum::http::StatusCode::BAD_REQUEST,
                message: format!("Invalid JSON body: {}", e),
            })
    }
}
