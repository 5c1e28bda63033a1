//! Data sources behind the security widgets.

use async_trait::async_trait;
use chrono::Utc;

use crate::config::SupplyChainConfig;
use crate::supply_chain::attestation::{mock_attestation, AttestationData};
use crate::supply_chain::policy::{mock_report, PolicyReport};
use crate::supply_chain::vulnerability::{mock_summary, VulnerabilitySummary};
use crate::supply_chain::SupplyChainError;

/// Source of attestation, scan and policy data for an entity.
#[async_trait]
pub trait SecurityDataSource: Send + Sync {
    async fn attestation(&self, image_ref: &str) -> Result<AttestationData, SupplyChainError>;

    async fn vulnerabilities(&self, image_ref: &str) -> Result<VulnerabilitySummary, SupplyChainError>;

    async fn policy_report(&self, namespace: &str) -> Result<PolicyReport, SupplyChainError>;
}

/// Hard-coded payloads. Performs no verification, scanning or evaluation.
#[derive(Debug, Clone)]
pub struct MockSecurityData {
    config: SupplyChainConfig,
}

impl MockSecurityData {
    pub fn new(config: SupplyChainConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SecurityDataSource for MockSecurityData {
    async fn attestation(&self, image_ref: &str) -> Result<AttestationData, SupplyChainError> {
        tracing::debug!(image_ref = %image_ref, "Serving mocked attestation");
        Ok(mock_attestation(image_ref, &self.config, Utc::now()))
    }

    async fn vulnerabilities(&self, image_ref: &str) -> Result<VulnerabilitySummary, SupplyChainError> {
        tracing::debug!(image_ref = %image_ref, "Serving mocked scan summary");
        Ok(mock_summary(Utc::now()))
    }

    async fn policy_report(&self, namespace: &str) -> Result<PolicyReport, SupplyChainError> {
        tracing::debug!(namespace = %namespace, "Serving mocked policy report");
        Ok(mock_report())
    }
}
