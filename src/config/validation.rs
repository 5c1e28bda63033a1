//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the backend URL is usable as a base for upstream calls
//! - Detect duplicate catalog entities
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_FORMATS: &[&str] = &["text", "json", "pretty"];

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid backend URL '{0}'")]
    InvalidBackendUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("security.request_timeout_secs ({request}) must be greater than the backend timeouts ({backend})")]
    RequestTimeoutTooShort { request: u64, backend: u64 },

    #[error("unknown log format '{0}' (expected text, json or pretty)")]
    UnknownLogFormat(String),

    #[error("catalog entity at index {0} has an empty name")]
    EmptyEntityName(usize),

    #[error("duplicate catalog entity '{0}'")]
    DuplicateEntity(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }

    match url::Url::parse(&config.backend.base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => {}
        _ => errors.push(ValidationError::InvalidBackendUrl(
            config.backend.base_url.clone(),
        )),
    }

    if config.backend.page_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("backend.page_timeout_secs"));
    }
    if config.backend.proxy_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("backend.proxy_timeout_secs"));
    }
    if config.backend.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("backend.connect_timeout_secs"));
    }
    if config.security.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("security.request_timeout_secs"));
    }
    let backend_timeout = config
        .backend
        .page_timeout_secs
        .max(config.backend.proxy_timeout_secs);
    if config.security.request_timeout_secs != 0
        && config.security.request_timeout_secs <= backend_timeout
    {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: config.security.request_timeout_secs,
            backend: backend_timeout,
        });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroValue("security.max_body_size"));
    }

    if !LOG_FORMATS.contains(&config.observability.log_format.as_str()) {
        errors.push(ValidationError::UnknownLogFormat(
            config.observability.log_format.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for (i, entity) in config.catalog.entities.iter().enumerate() {
        let name = entity.metadata.name.as_str();
        if name.is_empty() {
            errors.push(ValidationError::EmptyEntityName(i));
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateEntity(name.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
