//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All handlers produce:
//!     → logging.rs (structured log events, one span per request)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through request spans and upstream calls
//! - Metrics are cheap (atomic increments) and off by default

pub mod logging;
pub mod metrics;
