//! Extension surface of the supply-chain security widgets.
//!
//! # Responsibilities
//! - Name the components and the routable page a host can mount
//! - Resolve catalog entities by name
//! - Build one card, or the whole page, for an entity
//!
//! # Design Decisions
//! - Cards gate on annotations before touching the data source
//! - A failing data source degrades one panel, not the whole page

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::config::{CatalogConfig, SupplyChainConfig};
use crate::supply_chain::attestation::AttestationCard;
use crate::supply_chain::entity::CatalogEntity;
use crate::supply_chain::policy::PolicyCard;
use crate::supply_chain::provider::SecurityDataSource;
use crate::supply_chain::slsa::SlsaBadge;
use crate::supply_chain::vulnerability::ScanCard;
use crate::supply_chain::SupplyChainError;

pub const PLUGIN_ID: &str = "supply-chain-security";

/// Route the security page is mounted at.
pub const PAGE_ROUTE: &str = "/security/{entity}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Component {
    #[serde(rename = "AttestationCard")]
    Attestation,
    #[serde(rename = "KyvernoReportCard")]
    PolicyReport,
    #[serde(rename = "TrivyScanCard")]
    VulnerabilityScan,
    #[serde(rename = "SLSABadge")]
    SlsaBadge,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Attestation,
        Component::PolicyReport,
        Component::VulnerabilityScan,
        Component::SlsaBadge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Component::Attestation => "AttestationCard",
            Component::PolicyReport => "KyvernoReportCard",
            Component::VulnerabilityScan => "TrivyScanCard",
            Component::SlsaBadge => "SLSABadge",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = SupplyChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SupplyChainError::UnknownComponent(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    Component,
    Routable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    pub name: &'static str,
    pub kind: ExtensionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginManifest {
    pub id: &'static str,
    pub extensions: Vec<Extension>,
}

/// Everything the plugin offers to a host application.
pub fn manifest() -> PluginManifest {
    let mut extensions = vec![Extension {
        name: "SupplyChainSecurityPage",
        kind: ExtensionKind::Routable,
        mount_path: Some(PAGE_ROUTE),
    }];
    extensions.extend(Component::ALL.iter().map(|c| Extension {
        name: c.name(),
        kind: ExtensionKind::Component,
        mount_path: None,
    }));

    PluginManifest {
        id: PLUGIN_ID,
        extensions,
    }
}

/// A panel that either rendered or failed on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Panel<T> {
    Ready(T),
    Failed { error: String },
}

impl<T> From<Result<T, SupplyChainError>> for Panel<T> {
    fn from(result: Result<T, SupplyChainError>) -> Self {
        match result {
            Ok(card) => Panel::Ready(card),
            Err(e) => {
                tracing::warn!(error = %e, "Security panel failed");
                Panel::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// A single rendered component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "component", content = "data")]
pub enum ComponentView {
    #[serde(rename = "AttestationCard")]
    Attestation(AttestationCard),
    #[serde(rename = "KyvernoReportCard")]
    PolicyReport(PolicyCard),
    #[serde(rename = "TrivyScanCard")]
    VulnerabilityScan(ScanCard),
    #[serde(rename = "SLSABadge")]
    SlsaBadge(SlsaBadge),
}

/// The full security page for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityOverview {
    pub title: &'static str,
    pub subtitle: String,
    pub entity: String,
    pub slsa: SlsaBadge,
    pub attestation: Panel<AttestationCard>,
    pub vulnerabilities: Panel<ScanCard>,
    pub policies: Panel<PolicyCard>,
}

/// Builds widget view models from a data source.
#[derive(Clone)]
pub struct SupplyChainService {
    source: Arc<dyn SecurityDataSource>,
    config: SupplyChainConfig,
    catalog: CatalogConfig,
}

impl SupplyChainService {
    pub fn new(
        source: Arc<dyn SecurityDataSource>,
        config: SupplyChainConfig,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            source,
            config,
            catalog,
        }
    }

    /// Registered entity by name.
    pub fn entity(&self, name: &str) -> Result<&CatalogEntity, SupplyChainError> {
        self.catalog
            .find(name)
            .ok_or_else(|| SupplyChainError::EntityNotFound(name.to_string()))
    }

    pub async fn attestation_card(&self, entity: &CatalogEntity) -> Result<AttestationCard, SupplyChainError> {
        if !entity.attestation_enabled() {
            return Ok(AttestationCard::disabled());
        }
        let Some(image_ref) = entity.image_ref() else {
            return Ok(AttestationCard::missing_image());
        };
        let data = self.source.attestation(image_ref).await?;
        Ok(AttestationCard::ready(data, image_ref, &self.config))
    }

    pub async fn scan_card(&self, entity: &CatalogEntity) -> Result<ScanCard, SupplyChainError> {
        let Some(image_ref) = entity.image_ref() else {
            return Ok(ScanCard::not_configured());
        };
        let summary = self.source.vulnerabilities(image_ref).await?;
        Ok(ScanCard::ready(summary, entity.project_slug()))
    }

    pub async fn policy_card(&self, entity: &CatalogEntity) -> Result<PolicyCard, SupplyChainError> {
        if !entity.policy_enforced() {
            return Ok(PolicyCard::not_enforced());
        }
        let namespace = entity.namespace();
        let report = self.source.policy_report(namespace).await?;
        Ok(PolicyCard::ready(report, namespace))
    }

    pub async fn render_component(
        &self,
        component: Component,
        entity: &CatalogEntity,
    ) -> Result<ComponentView, SupplyChainError> {
        Ok(match component {
            Component::Attestation => ComponentView::Attestation(self.attestation_card(entity).await?),
            Component::PolicyReport => ComponentView::PolicyReport(self.policy_card(entity).await?),
            Component::VulnerabilityScan => {
                ComponentView::VulnerabilityScan(self.scan_card(entity).await?)
            }
            Component::SlsaBadge => ComponentView::SlsaBadge(SlsaBadge::for_entity(entity)),
        })
    }

    pub async fn overview(&self, entity: &CatalogEntity) -> SecurityOverview {
        let (attestation, vulnerabilities, policies) = tokio::join!(
            self.attestation_card(entity),
            self.scan_card(entity),
            self.policy_card(entity),
        );

        SecurityOverview {
            title: "Supply Chain Security",
            subtitle: format!("Security overview for {}", entity.name()),
            entity: entity.name().to_string(),
            slsa: SlsaBadge::for_entity(entity),
            attestation: attestation.into(),
            vulnerabilities: vulnerabilities.into(),
            policies: policies.into(),
        }
    }
}
