//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, body extraction)
//!     → pages.rs | api.rs | security.rs | health.rs
//!     → error.rs (map failures to status + JSON)
//!     → Send to client
//! ```

pub mod api;
pub mod error;
pub mod health;
pub mod pages;
pub mod request;
pub mod security;
pub mod server;

pub use error::AppError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
