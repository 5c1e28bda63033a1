//! Backend API client subsystem.
//!
//! # Data Flow
//! ```text
//! page handler ─┐
//!               ├→ client.rs (one call, fixed timeout, request id header)
//! api handler ──┘     → UpstreamResponse | UpstreamError
//! ```
//!
//! # Design Decisions
//! - Exactly one upstream call per inbound request, no retries
//! - Non-2xx responses are errors, mirroring the browser-side HTTP client
//! - Every call has a deadline

pub mod client;

pub use client::{BackendClient, UpstreamError, UpstreamResponse};
