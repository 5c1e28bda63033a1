//! Vulnerability scan summary card.
//!
//! Gated on the `trivy/image-ref` annotation. Scan results are mocked; the
//! pass/fail status follows the build gate, which blocks on CRITICAL and HIGH
//! findings.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Passed,
    Failed,
}

impl ScanStatus {
    pub fn from_counts(critical: u32, high: u32) -> Self {
        if critical + high > 0 {
            ScanStatus::Failed
        } else {
            ScanStatus::Passed
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ScanStatus::Passed => "Scan Passed",
            ScanStatus::Failed => "Scan Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    /// Icon color for a non-zero count.
    pub fn icon_color(&self) -> &'static str {
        match self {
            Severity::Critical => "#d32f2f",
            Severity::High => "#f44336",
            Severity::Medium => "#ff9800",
            Severity::Low => "#2196f3",
        }
    }

    /// Tile background. Only the blocking severities are tinted.
    pub fn tile_background(&self, count: u32) -> Option<&'static str> {
        match (self, count) {
            (Severity::Critical | Severity::High, 0) => Some("#e8f5e9"),
            (Severity::Critical, _) => Some("#ffebee"),
            (Severity::High, _) => Some("#fff3e0"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilitySummary {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub scan_time: DateTime<Utc>,
    pub status: ScanStatus,
}

impl VulnerabilitySummary {
    pub fn new(critical: u32, high: u32, medium: u32, low: u32, scan_time: DateTime<Utc>) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
            scan_time,
            status: ScanStatus::from_counts(critical, high),
        }
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }

    pub fn count(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn tiles(&self) -> Vec<SeverityTile> {
        Severity::ALL
            .iter()
            .map(|&severity| {
                let count = self.count(severity);
                SeverityTile {
                    severity,
                    count,
                    icon_color: if count == 0 { "green" } else { severity.icon_color() },
                    background: severity.tile_background(count),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityTile {
    pub severity: Severity,
    pub count: u32,
    pub icon_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScanCard {
    NotConfigured {
        message: &'static str,
    },
    Ready {
        title: &'static str,
        summary: VulnerabilitySummary,
        total: u32,
        tiles: Vec<SeverityTile>,
        security_url: String,
        notes: [&'static str; 2],
    },
}

impl ScanCard {
    pub const TITLE: &'static str = "Trivy Vulnerability Scan";

    pub fn not_configured() -> Self {
        Self::NotConfigured {
            message: "No image reference configured",
        }
    }

    pub fn ready(summary: VulnerabilitySummary, project_slug: &str) -> Self {
        Self::Ready {
            title: Self::TITLE,
            total: summary.total(),
            tiles: summary.tiles(),
            summary,
            security_url: code_scanning_url(project_slug),
            notes: [
                "Scans run on every build before image push. Blocks on CRITICAL and HIGH vulnerabilities.",
                "ignore-unfixed: true (ignores vulnerabilities with no available fix)",
            ],
        }
    }
}

pub fn code_scanning_url(project_slug: &str) -> String {
    format!("https://github.com/{}/security/code-scanning", project_slug)
}

/// Mocked scan result for an image.
pub fn mock_summary(now: DateTime<Utc>) -> VulnerabilitySummary {
    VulnerabilitySummary::new(0, 0, 3, 5, now)
}
