//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (request body size, total handling time)
//!     → handlers
//! Outgoing response:
//!     → headers.rs (security response headers)
//! ```
//!
//! # Design Decisions
//! - Limits reject before handlers run
//! - Headers a handler already set are never overwritten

pub mod headers;
pub mod limits;
