//! End-to-end tests for the page, proxy and health routes.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{routing::get, Router};
use dashboard_frontend::HttpServer;
use dashboard_sdk::{DashboardClient, NewUser};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_health_has_fixed_shape() {
    // Backend is never contacted, so a dead address is fine.
    let (addr, shutdown) = common::start_frontend(common::config_for(common::unused_addr())).await;
    let sdk = DashboardClient::new(&format!("http://{}", addr));

    let health = sdk.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "frontend");
    assert!(health.uptime >= 0.0);
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());

    shutdown.trigger();
}

#[tokio::test]
async fn test_list_users_is_passed_through() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;
    let sdk = DashboardClient::new(&format!("http://{}", addr));

    let users = sdk.users().await.unwrap();
    assert_eq!(users["from_cache"], false);
    assert_eq!(users["users"][0]["username"], "ada");

    shutdown.trigger();
}

#[tokio::test]
async fn test_create_user_forwards_status_and_body() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;
    let client = common::http_client();

    let res = client
        .post(format!("http://{}/api/users", addr))
        .json(&NewUser {
            username: "grace".into(),
            email: "grace@example.com".into(),
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["username"], "grace");

    let sdk = DashboardClient::new(&format!("http://{}", addr));
    let users = sdk.users().await.unwrap();
    assert_eq!(users["users"].as_array().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_form_post_is_converted_to_json() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;

    let res = common::http_client()
        .post(format!("http://{}/api/users", addr))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("username=linus&email=linus%40example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["user"]["email"], "linus@example.com");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_rejection_becomes_500() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;

    let res = common::http_client()
        .post(format!("http://{}/api/users", addr))
        .json(&json!({ "username": "no-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Request failed with status code 400");

    shutdown.trigger();
}

#[tokio::test]
async fn test_backend_down() {
    let (addr, shutdown) = common::start_frontend(common::config_for(common::unused_addr())).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{}/api/users", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Microservices Dashboard"));
    assert!(html.contains("Unable to fetch backend data"));

    let res = client.get(format!("http://{}/users", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Unable to fetch users"));
    assert!(html.contains("No users found."));

    shutdown.trigger();
}

#[tokio::test]
async fn test_pages_render_backend_data() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;
    let client = common::http_client();

    let html = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Total users"));
    assert!(html.contains("Updated 2026-01-03T00:00:00"));

    let html = client
        .get(format!("http://{}/users", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<td>ada@example.com</td>"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_page_timeout_falls_back() {
    let backend = common::start_slow_backend(Duration::from_secs(3)).await;
    let mut config = common::config_for(backend);
    config.backend.page_timeout_secs = 1;
    let (addr, shutdown) = common::start_frontend(config).await;

    let res = common::http_client()
        .get(format!("http://{}/users", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Unable to fetch users"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let (addr, shutdown) = common::start_frontend(common::config_for(common::unused_addr())).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{}/no/such/page", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().contains("Page Not Found"));

    let res = client
        .post(format!("http://{}/no/such/page", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_static_files_served() {
    let dir = std::env::temp_dir().join(format!("dashboard-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("app.css"), "body{}").unwrap();

    let mut config = common::config_for(common::unused_addr());
    config.server.static_dir = dir.to_string_lossy().into_owned();
    let (addr, shutdown) = common::start_frontend(config).await;

    let res = common::http_client()
        .get(format!("http://{}/app.css", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "body{}");

    shutdown.trigger();
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_response_headers() {
    let (addr, shutdown) = common::start_frontend(common::config_for(common::unused_addr())).await;

    let res = common::http_client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    let headers = res.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert!(headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|id| uuid::Uuid::parse_str(id).is_ok()));

    let res = common::http_client()
        .get(format!("http://{}/health", addr))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let backend = common::start_mock_backend().await;
    let mut config = common::config_for(backend);
    config.security.max_body_size = 64;
    let (addr, shutdown) = common::start_frontend(config).await;

    let res = common::http_client()
        .post(format!("http://{}/api/users", addr))
        .json(&json!({ "username": "x".repeat(200), "email": "x@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    shutdown.trigger();
}

#[tokio::test]
async fn test_proxy_timeout_is_json_error() {
    let backend = common::start_slow_backend(Duration::from_secs(3)).await;
    let mut config = common::config_for(backend);
    config.backend.proxy_timeout_secs = 1;
    config.security.request_timeout_secs = 2;
    let (addr, shutdown) = common::start_frontend(config).await;

    let res = common::http_client()
        .get(format!("http://{}/api/users", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "timeout of 1000ms exceeded");

    shutdown.trigger();
}

#[tokio::test]
async fn test_single_user_routes() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;
    let client = common::http_client();
    let base = format!("http://{}/api/users", addr);

    let res = client.get(format!("{}/1", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = res.json().await.unwrap();
    assert_eq!(user["username"], "ada");

    let res = client
        .put(format!("{}/1", base))
        .json(&json!({ "email": "ada@lovelace.dev" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["user"]["email"], "ada@lovelace.dev");

    let res = client.delete(format!("{}/1", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "User deleted successfully");

    let res = client.get(format!("{}/1", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Request failed with status code 404");

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_numeric_user_id_reaches_backend() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;

    let res = common::http_client()
        .get(format!("http://{}/api/users/abc", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Request failed with status code 404");

    shutdown.trigger();
}

#[tokio::test]
async fn test_stats_is_passed_through() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;

    let res = common::http_client()
        .get(format!("http://{}/api/stats", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats: Value = res.json().await.unwrap();
    assert_eq!(stats["total_users"], 1);
    assert_eq!(stats["timestamp"], "2026-01-03T00:00:00");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_forwarded_upstream() {
    let backend = common::start_mock_backend().await;
    let (addr, shutdown) = common::start_frontend(common::config_for(backend)).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{}/api/users", addr))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["request_id"], "trace-42");

    let res = client
        .get(format!("http://{}/api/users", addr))
        .send()
        .await
        .unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap().to_string();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["request_id"], generated.as_str());

    shutdown.trigger();
}

async fn explode() -> &'static str {
    panic!("kaboom")
}

async fn panic_response(environment: &str) -> (StatusCode, Value) {
    let mut config = common::config_for(common::unused_addr());
    config.server.environment = environment.to_string();
    let router = HttpServer::apply_layers(Router::new().route("/explode", get(explode)), &config);

    let response = router
        .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_panic_becomes_generic_error() {
    let (status, body) = panic_response("production").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Something went wrong!" }));

    let (status, body) = panic_response("development").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Something went wrong!");
    assert_eq!(body["message"], "kaboom");
}
