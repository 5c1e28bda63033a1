//! Metrics collection and exposition.
//!
//! # Metrics
//! - `frontend_requests_total` (counter): requests by method, route, status
//! - `frontend_request_duration_seconds` (histogram): latency distribution
//! - `frontend_upstream_requests_total` (counter): backend calls by outcome
//! - `frontend_upstream_duration_seconds` (histogram): backend latency

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("frontend_requests_total", &labels[..]).increment(1);
    histogram!("frontend_request_duration_seconds", &labels[..]).record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(path: &str, outcome: &'static str, start: Instant) {
    let labels = [("path", path.to_string()), ("outcome", outcome.to_string())];
    counter!("frontend_upstream_requests_total", &labels[..]).increment(1);
    histogram!("frontend_upstream_duration_seconds", &labels[..]).record(start.elapsed().as_secs_f64());
}

/// Middleware recording one sample per request, labelled by matched route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "fallback".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
