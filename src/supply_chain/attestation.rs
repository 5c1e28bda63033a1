//! Image attestation and SLSA provenance card.
//!
//! Gated on the `sigstore/attestation-enabled` annotation. Data is mocked:
//! nothing here verifies a signature.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SupplyChainConfig;

/// Digest shown when the image reference is not pinned by digest.
pub const PLACEHOLDER_DIGEST: &str = "sha256:abc123...";

pub const PREDICATE_SLSA_PROVENANCE: &str = "https://slsa.dev/provenance/v0.2";
pub const GITHUB_ACTIONS_ISSUER: &str = "https://token.actions.githubusercontent.com";
pub const BUILD_WORKFLOW: &str = ".github/workflows/3-build-deploy.yml";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationData {
    pub verified: bool,
    pub digest: String,
    pub predicate_type: String,
    pub issuer: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
    pub rekor_log_id: String,
    pub git_sha: String,
    pub workflow: String,
}

/// Links and commands derived from an attestation for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationLinks {
    pub rekor_entry_url: String,
    pub rekor_log_id_short: String,
    pub commit_url: String,
    pub verify_command: String,
    pub deep_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AttestationCard {
    /// Annotation missing or not "true".
    Disabled { message: &'static str },
    /// Enabled but the entity names no image.
    MissingImage { message: &'static str },
    Ready {
        title: &'static str,
        attestation: AttestationData,
        links: AttestationLinks,
    },
}

impl AttestationCard {
    pub const TITLE: &'static str = "Image Attestation & SLSA Provenance";
    pub const DISABLED_TITLE: &'static str = "Image Attestation";

    pub fn disabled() -> Self {
        Self::Disabled {
            message: "Attestations not enabled for this component",
        }
    }

    pub fn missing_image() -> Self {
        Self::MissingImage {
            message: "No image reference configured",
        }
    }

    pub fn ready(attestation: AttestationData, image_ref: &str, config: &SupplyChainConfig) -> Self {
        let links = AttestationLinks::new(&attestation, image_ref, config);
        Self::Ready {
            title: Self::TITLE,
            attestation,
            links,
        }
    }
}

impl AttestationLinks {
    pub fn new(attestation: &AttestationData, image_ref: &str, config: &SupplyChainConfig) -> Self {
        let rekor = config.rekor_url.trim_end_matches('/');
        Self {
            rekor_entry_url: format!("{}/api/v1/log/entries/{}", rekor, attestation.rekor_log_id),
            rekor_log_id_short: short_log_id(&attestation.rekor_log_id),
            commit_url: format!(
                "https://github.com/{}/commit/{}",
                config.repository, attestation.git_sha
            ),
            verify_command: format!(
                "gh attestation verify {} --owner {}",
                image_ref,
                config.owner()
            ),
            deep_link: rekor.to_string(),
        }
    }
}

/// Digest portion of an image reference pinned with `@`.
pub fn digest_from_image_ref(image_ref: &str) -> Option<&str> {
    image_ref
        .split_once('@')
        .map(|(_, digest)| digest)
        .filter(|d| !d.is_empty())
}

/// First 16 characters of a transparency log id followed by an ellipsis.
pub fn short_log_id(log_id: &str) -> String {
    let prefix: String = log_id.chars().take(16).collect();
    format!("{}...", prefix)
}

/// Build the mocked attestation for an image.
pub fn mock_attestation(image_ref: &str, config: &SupplyChainConfig, now: DateTime<Utc>) -> AttestationData {
    AttestationData {
        verified: true,
        digest: digest_from_image_ref(image_ref)
            .unwrap_or(PLACEHOLDER_DIGEST)
            .to_string(),
        predicate_type: PREDICATE_SLSA_PROVENANCE.to_string(),
        issuer: GITHUB_ACTIONS_ISSUER.to_string(),
        subject: format!("https://github.com/{}/{}", config.repository, BUILD_WORKFLOW),
        timestamp: now,
        rekor_log_id: "c0d23d6ad406973f9559f3ba2d1ca01f84147d8ffc5b8445c224f98b9591801d"
            .to_string(),
        git_sha: "f9edfc3...".to_string(),
        workflow: BUILD_WORKFLOW.to_string(),
    }
}
