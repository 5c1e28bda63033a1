//! Request limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size (413 Payload Too Large)
//! - Enforce total request handling time (408 Request Timeout)

use std::time::Duration;

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::SecurityConfig;

/// Layer body-size and timeout limits onto a router.
#[allow(deprecated)]
pub fn apply_limits(router: Router, config: &SecurityConfig) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
}
