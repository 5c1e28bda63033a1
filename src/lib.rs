//! Microservices dashboard frontend library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod supply_chain;
pub mod upstream;
pub mod views;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
