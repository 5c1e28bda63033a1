//! Server-rendered pages.
//!
//! Upstream failures never change the status of a page: the page renders
//! with an error message instead.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use serde_json::Value;

use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::views;

pub const HOME_TITLE: &str = "Microservices Dashboard";
pub const USERS_TITLE: &str = "Users";
pub const NOT_FOUND_TITLE: &str = "Page Not Found";

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let stats = state
        .backend
        .get_json("/api/stats", state.page_timeout(), headers.request_id())
        .await;

    match stats {
        Ok(stats) => Html(views::index(HOME_TITLE, Ok(&stats))),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching stats");
            Html(views::index(HOME_TITLE, Err("Unable to fetch backend data")))
        }
    }
}

pub async fn users(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let payload = state
        .backend
        .get_json("/api/users", state.page_timeout(), headers.request_id())
        .await;

    match payload {
        Ok(payload) => {
            let list = user_list(&payload);
            Html(views::users(USERS_TITLE, list, None))
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching users");
            Html(views::users(USERS_TITLE, &[], Some("Unable to fetch users")))
        }
    }
}

/// `users` array of the backend payload, or nothing.
fn user_list(payload: &Value) -> &[Value] {
    payload
        .get("users")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found(NOT_FOUND_TITLE, None)))
}
