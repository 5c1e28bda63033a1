//! Catalog entity shape and the annotations the security widgets read.
//!
//! Annotations are untyped configuration: every value is a string, boolean
//! switches are on only for the exact value `"true"`, and empty values are
//! treated as absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const IMAGE_REF: &str = "trivy/image-ref";
pub const ATTESTATION_ENABLED: &str = "sigstore/attestation-enabled";
pub const PROJECT_SLUG: &str = "github.com/project-slug";
pub const POLICY_ENFORCED: &str = "kyverno/policy-enforced";
pub const KUBERNETES_NAMESPACE: &str = "backstage.io/kubernetes-namespace";
pub const SLSA_LEVEL: &str = "slsa/level";

/// Namespace used when an entity does not name one.
pub const DEFAULT_NAMESPACE: &str = "microservices";

/// A software catalog entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogEntity {
    pub metadata: EntityMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<EntitySpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EntityMetadata {
    pub name: String,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EntitySpec {
    #[serde(
        rename = "securityMetadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_metadata: Option<SecurityMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SecurityMetadata {
    /// Declared SLSA level. Catalog files write this as a number or a string.
    #[serde(
        rename = "slsaLevel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub slsa_level: Option<serde_json::Value>,
}

impl CatalogEntity {
    /// Entity with a name and no annotations.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            metadata: EntityMetadata {
                name: name.into(),
                annotations: BTreeMap::new(),
            },
            spec: None,
        }
    }

    /// Builder-style annotation setter.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.annotations.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Non-empty annotation value.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn flag(&self, key: &str) -> bool {
        self.annotation(key) == Some("true")
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.annotation(IMAGE_REF)
    }

    pub fn attestation_enabled(&self) -> bool {
        self.flag(ATTESTATION_ENABLED)
    }

    pub fn policy_enforced(&self) -> bool {
        self.flag(POLICY_ENFORCED)
    }

    pub fn project_slug(&self) -> &str {
        self.annotation(PROJECT_SLUG).unwrap_or("")
    }

    pub fn namespace(&self) -> &str {
        self.annotation(KUBERNETES_NAMESPACE)
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Declared SLSA level from `spec.securityMetadata`, if any.
    pub fn declared_slsa_level(&self) -> Option<String> {
        let value = self
            .spec
            .as_ref()?
            .security_metadata
            .as_ref()?
            .slsa_level
            .as_ref()?;

        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }
}
