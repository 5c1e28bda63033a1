//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs (environment overrides: PORT, BACKEND_API_URL, APP_ENV)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::AppConfig;
pub use schema::BackendConfig;
pub use schema::CatalogConfig;
pub use schema::ObservabilityConfig;
pub use schema::SecurityConfig;
pub use schema::ServerConfig;
pub use schema::SupplyChainConfig;
pub use validation::{validate_config, ValidationError};
