//! Supply-chain security widgets.
//!
//! # Data Flow
//! ```text
//! CatalogEntity (annotations = untyped configuration)
//!     → plugin.rs (gate each card on its annotation)
//!     → provider.rs (SecurityDataSource; mocked payloads)
//!     → attestation.rs / vulnerability.rs / policy.rs / slsa.rs (view models)
//!     → http handlers (JSON) or views (HTML page)
//! ```
//!
//! # Design Decisions
//! - View models are immutable and built for one rendering pass
//! - No real verification, scanning or policy evaluation happens here

pub mod attestation;
pub mod entity;
pub mod plugin;
pub mod policy;
pub mod provider;
pub mod slsa;
pub mod vulnerability;

use thiserror::Error;

pub use entity::CatalogEntity;
pub use plugin::{manifest, Component, ComponentView, Panel, SecurityOverview, SupplyChainService};
pub use provider::{MockSecurityData, SecurityDataSource};

/// Errors raised while building security widgets.
#[derive(Debug, Error)]
pub enum SupplyChainError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Data source error: {0}")]
    DataSource(String),
}
