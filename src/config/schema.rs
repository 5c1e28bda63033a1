//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the frontend.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::supply_chain::CatalogEntity;

/// Root configuration for the dashboard frontend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener and environment settings.
    pub server: ServerConfig,

    /// Upstream backend API settings.
    pub backend: BackendConfig,

    /// Security hardening and request limits.
    pub security: SecurityConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Supply-chain widget settings.
    pub supply_chain: SupplyChainConfig,

    /// Catalog entities known to the security pages.
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Whether error details may be exposed to clients.
    pub fn is_development(&self) -> bool {
        self.server.environment == "development"
    }

    /// Apply environment overrides on top of file/default values.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            let host = self
                .server
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.server.bind_address = format!("{}:{}", host, port);
        }
        if let Some(url) = lookup("BACKEND_API_URL").filter(|u| !u.is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(env) = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .filter(|e| !e.is_empty())
        {
            self.server.environment = env;
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|l| !l.is_empty()) {
            self.observability.log_level = level;
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Deployment environment ("development", "production", ...).
    pub environment: String,

    /// Directory served for static assets.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            environment: "development".to_string(),
            static_dir: "public".to_string(),
        }
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend API (e.g., "http://backend:5000").
    pub base_url: String,

    /// Timeout for upstream calls made while rendering pages.
    pub page_timeout_secs: u64,

    /// Timeout for passthrough API calls.
    pub proxy_timeout_secs: u64,

    /// TCP connect timeout.
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://backend:5000".to_string(),
            page_timeout_secs: 5,
            proxy_timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Gzip responses when the client accepts it.
    pub compression: bool,
    /// Total time allowed for handling one request. Must exceed both
    /// backend timeouts so upstream timeouts surface as JSON errors.
    pub request_timeout_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 1024 * 1024, // 1MB
            compression: true,
            request_timeout_secs: 35,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format: "text", "json" or "pretty".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Supply-chain widget configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SupplyChainConfig {
    /// GitHub repository ("owner/name") that builds the images.
    pub repository: String,

    /// Transparency log base URL.
    pub rekor_url: String,
}

impl SupplyChainConfig {
    /// Owner part of `repository`.
    pub fn owner(&self) -> &str {
        self.repository
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.repository)
    }
}

impl Default for SupplyChainConfig {
    fn default() -> Self {
        Self {
            repository: "blackskyi/gcp-k8s-microservices".to_string(),
            rekor_url: "https://rekor.sigstore.dev".to_string(),
        }
    }
}

/// Registered catalog entities.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub entities: Vec<CatalogEntity>,
}

impl CatalogConfig {
    pub fn find(&self, name: &str) -> Option<&CatalogEntity> {
        self.entities.iter().find(|e| e.metadata.name == name)
    }
}
