//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use dashboard_frontend::config::AppConfig;
use dashboard_frontend::{HttpServer, Shutdown};

/// Serve a router on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

type Users = Arc<Mutex<Vec<Value>>>;

/// Start a backend API double with an in-memory user table.
#[allow(dead_code)]
pub async fn start_mock_backend() -> SocketAddr {
    let users: Users = Arc::new(Mutex::new(vec![json!({
        "id": 1,
        "username": "ada",
        "email": "ada@example.com",
        "created_at": "2026-01-01T00:00:00"
    })]));

    let router = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/stats", get(stats))
        .with_state(users);

    serve(router).await
}

/// Lists users and echoes the `x-request-id` it received.
async fn list_users(State(users): State<Users>, headers: HeaderMap) -> Json<Value> {
    let users = users.lock().unwrap().clone();
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "users": users, "from_cache": false, "request_id": request_id }))
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

fn position(users: &[Value], id: &str) -> Option<usize> {
    let id: u64 = id.parse().ok()?;
    users.iter().position(|u| u["id"].as_u64() == Some(id))
}

async fn get_user(State(users): State<Users>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let users = users.lock().unwrap();
    match position(&users, &id) {
        Some(i) => (StatusCode::OK, Json(users[i].clone())),
        None => not_found(),
    }
}

async fn update_user(
    State(users): State<Users>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut users = users.lock().unwrap();
    let Some(i) = position(&users, &id) else {
        return not_found();
    };
    for field in ["username", "email"] {
        if let Some(value) = body.get(field) {
            users[i][field] = value.clone();
        }
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "User updated successfully", "user": users[i] })),
    )
}

async fn delete_user(State(users): State<Users>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let mut users = users.lock().unwrap();
    let Some(i) = position(&users, &id) else {
        return not_found();
    };
    users.remove(i);
    (
        StatusCode::OK,
        Json(json!({ "message": "User deleted successfully" })),
    )
}

async fn create_user(State(users): State<Users>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let (Some(username), Some(email)) = (body.get("username"), body.get("email")) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Username and email are required" })),
        );
    };

    let mut users = users.lock().unwrap();
    let user = json!({
        "id": users.len() + 1,
        "username": username,
        "email": email,
        "created_at": "2026-01-02T00:00:00"
    });
    users.push(user.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": user })),
    )
}

async fn stats(State(users): State<Users>) -> Json<Value> {
    let total = users.lock().unwrap().len();
    Json(json!({
        "total_users": total,
        "recent_users": total,
        "timestamp": "2026-01-03T00:00:00",
        "cache_hits": 0
    }))
}

/// Start a backend that answers every request after a delay.
#[allow(dead_code)]
pub async fn start_slow_backend(delay: Duration) -> SocketAddr {
    let router = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        Json(json!({ "users": [] }))
    });
    serve(router).await
}

/// Config pointing at a backend, bound to an ephemeral port.
pub fn config_for(backend: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config.backend.base_url = format!("http://{}", backend);
    config
}

/// Start the frontend with a config; returns its address and shutdown handle.
pub async fn start_frontend(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.server.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
