//! JSON passthrough routes to the backend API.
//!
//! On success the upstream status, content type and body are returned
//! verbatim. Any failure becomes 500 `{"error": <message>}`.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, Method, Response},
    response::IntoResponse,
};

use crate::http::error::AppError;
use crate::http::request::{JsonPayload, RequestIdExt};
use crate::http::server::AppState;
use crate::upstream::UpstreamResponse;

pub async fn list_users(State(state): State<AppState>, headers: HeaderMap) -> Result<Response<Body>, AppError> {
    forward(&state, &headers, Method::GET, "/api/users", None).await
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonPayload(body): JsonPayload,
) -> Result<Response<Body>, AppError> {
    forward(&state, &headers, Method::POST, "/api/users", Some(&body)).await
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response<Body>, AppError> {
    forward(&state, &headers, Method::GET, &user_path(&id), None).await
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    JsonPayload(body): JsonPayload,
) -> Result<Response<Body>, AppError> {
    forward(&state, &headers, Method::PUT, &user_path(&id), Some(&body)).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response<Body>, AppError> {
    forward(&state, &headers, Method::DELETE, &user_path(&id), None).await
}

pub async fn stats(State(state): State<AppState>, headers: HeaderMap) -> Result<Response<Body>, AppError> {
    forward(&state, &headers, Method::GET, "/api/stats", None).await
}

async fn forward(
    state: &AppState,
    headers: &HeaderMap,
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
) -> Result<Response<Body>, AppError> {
    let upstream = state
        .backend
        .send(method, path, body, headers.request_id(), state.proxy_timeout())
        .await?;
    Ok(passthrough(upstream))
}

/// Backend path for one user. The id is forwarded as given, encoded as a
/// single path segment; the backend decides whether it exists.
fn user_path(id: &str) -> String {
    let segment: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("/api/users/{}", segment)
}

fn passthrough(upstream: UpstreamResponse) -> Response<Body> {
    let mut response = (upstream.status, upstream.body).into_response();
    match upstream.content_type {
        Some(content_type) => {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn test_passthrough_keeps_status_and_type() {
        let response = passthrough(UpstreamResponse {
            status: StatusCode::CREATED,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from_static(b"{\"id\":1}"),
        });
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_user_path_stays_one_segment() {
        assert_eq!(user_path("42"), "/api/users/42");
        assert_eq!(user_path("abc"), "/api/users/abc");
        assert_eq!(user_path("../stats"), "/api/users/..%2Fstats");
    }

    #[test]
    fn test_passthrough_without_content_type() {
        let response = passthrough(UpstreamResponse {
            status: StatusCode::OK,
            content_type: None,
            body: Bytes::new(),
        });
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }
}
