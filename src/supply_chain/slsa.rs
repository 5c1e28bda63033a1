//! SLSA badge.
//!
//! # Level Resolution
//! ```text
//! spec.securityMetadata.slsaLevel
//!     → annotation "slsa/level"
//!     → "0"
//! ```
//! The resolved value is kept as written; unrecognized values still render
//! a badge, just with the neutral color and an "unknown" tooltip.

use serde::Serialize;

use crate::supply_chain::entity::{CatalogEntity, SLSA_LEVEL};

const GREEN: &str = "#4caf50";
const BLUE: &str = "#2196f3";
const ORANGE: &str = "#ff9800";
const GREY: &str = "#9e9e9e";

/// Rendered badge for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlsaBadge {
    pub level: String,
    pub label: String,
    pub background: &'static str,
    pub color: &'static str,
    pub tooltip: &'static str,
}

impl SlsaBadge {
    pub fn for_entity(entity: &CatalogEntity) -> Self {
        Self::for_level(&resolve_level(entity))
    }

    pub fn for_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            label: format!("SLSA L{}", level),
            background: level_color(level),
            color: "white",
            tooltip: level_tooltip(level),
        }
    }
}

/// Resolve the SLSA level an entity advertises.
pub fn resolve_level(entity: &CatalogEntity) -> String {
    entity
        .declared_slsa_level()
        .or_else(|| entity.annotation(SLSA_LEVEL).map(str::to_string))
        .unwrap_or_else(|| "0".to_string())
}

pub fn level_color(level: &str) -> &'static str {
    match level {
        "3" | "4" => GREEN,
        "2" => BLUE,
        "1" => ORANGE,
        _ => GREY,
    }
}

pub fn level_tooltip(level: &str) -> &'static str {
    match level {
        "4" => "SLSA Level 4: Highest level - Two-person reviewed",
        "3" => "SLSA Level 3: Hardened builds with provenance",
        "2" => "SLSA Level 2: Hosted build service with provenance",
        "1" => "SLSA Level 1: Provenance exists",
        "0" => "SLSA Level 0: No guarantees",
        _ => "Unknown SLSA level",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supply_chain::entity::{EntitySpec, SecurityMetadata};

    #[test]
    fn test_defaults_to_level_zero() {
        let badge = SlsaBadge::for_entity(&CatalogEntity::named("svc"));
        assert_eq!(badge.level, "0");
        assert_eq!(badge.label, "SLSA L0");
        assert_eq!(badge.background, GREY);
        assert_eq!(badge.tooltip, "SLSA Level 0: No guarantees");
    }

    #[test]
    fn test_spec_wins_over_annotation() {
        let mut entity = CatalogEntity::named("svc").with_annotation(SLSA_LEVEL, "1");
        assert_eq!(resolve_level(&entity), "1");

        entity.spec = Some(EntitySpec {
            security_metadata: Some(SecurityMetadata {
                slsa_level: Some(serde_json::json!("3")),
            }),
        });
        assert_eq!(resolve_level(&entity), "3");
    }

    #[test]
    fn test_colors() {
        assert_eq!(level_color("4"), GREEN);
        assert_eq!(level_color("3"), GREEN);
        assert_eq!(level_color("2"), BLUE);
        assert_eq!(level_color("1"), ORANGE);
        assert_eq!(level_color("0"), GREY);
        assert_eq!(level_color("5"), GREY);
    }

    #[test]
    fn test_unknown_level_keeps_label() {
        let badge = SlsaBadge::for_level("7");
        assert_eq!(badge.label, "SLSA L7");
        assert_eq!(badge.tooltip, "Unknown SLSA level");
    }
}
