//! Policy report card.
//!
//! Gated on the `kyverno/policy-enforced` annotation. The report is mocked;
//! the summary is always recomputed from the result rows so the two can not
//! disagree.

use serde::Serialize;

/// Policies the cluster enforces, shown under the table.
pub const ENFORCED_POLICIES: &[&str] = &[
    "verify-signed-images",
    "security-best-practices",
    "block-latest-tag",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Pass,
    Fail,
    Warn,
    Skip,
}

impl PolicyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PolicyStatus::Pass => "PASS",
            PolicyStatus::Fail => "FAIL",
            PolicyStatus::Warn => "WARN",
            PolicyStatus::Skip => "SKIP",
        }
    }

    pub fn chip_color(&self) -> &'static str {
        match self {
            PolicyStatus::Pass => "#4caf50",
            PolicyStatus::Fail => "#f44336",
            PolicyStatus::Warn => "#ff9800",
            PolicyStatus::Skip => "#9e9e9e",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyResult {
    pub policy: String,
    pub rule: String,
    pub status: PolicyStatus,
    pub message: String,
    pub category: String,
}

impl PolicyResult {
    fn new(policy: &str, rule: &str, status: PolicyStatus, message: &str, category: &str) -> Self {
        Self {
            policy: policy.to_string(),
            rule: rule.to_string(),
            status,
            message: message.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PolicySummary {
    pub pass: u32,
    pub fail: u32,
    pub warn: u32,
    pub skip: u32,
}

impl PolicySummary {
    pub fn from_results(results: &[PolicyResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                PolicyStatus::Pass => acc.pass += 1,
                PolicyStatus::Fail => acc.fail += 1,
                PolicyStatus::Warn => acc.warn += 1,
                PolicyStatus::Skip => acc.skip += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyReport {
    pub summary: PolicySummary,
    pub results: Vec<PolicyResult>,
}

impl PolicyReport {
    pub fn new(results: Vec<PolicyResult>) -> Self {
        Self {
            summary: PolicySummary::from_results(&results),
            results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PolicyCard {
    NotEnforced {
        message: &'static str,
    },
    Ready {
        title: &'static str,
        namespace: String,
        report: PolicyReport,
        enforced_policies: &'static [&'static str],
    },
}

impl PolicyCard {
    pub const TITLE: &'static str = "Kyverno Policy Report";

    pub fn not_enforced() -> Self {
        Self::NotEnforced {
            message: "Policy enforcement not enabled for this component",
        }
    }

    pub fn ready(report: PolicyReport, namespace: &str) -> Self {
        Self::Ready {
            title: Self::TITLE,
            namespace: namespace.to_string(),
            report,
            enforced_policies: ENFORCED_POLICIES,
        }
    }
}

/// Mocked report for a namespace.
pub fn mock_report() -> PolicyReport {
    use PolicyStatus::Pass;

    PolicyReport::new(vec![
        PolicyResult::new(
            "verify-signed-images",
            "verify-slsa-provenance",
            Pass,
            "Image signature verified with SLSA provenance",
            "Security",
        ),
        PolicyResult::new(
            "security-best-practices",
            "require-non-root",
            Pass,
            "Container runs as non-root user",
            "Security",
        ),
        PolicyResult::new(
            "security-best-practices",
            "restrict-registries",
            Pass,
            "Image from allowed registry",
            "Security",
        ),
        PolicyResult::new(
            "security-best-practices",
            "require-resource-limits",
            Pass,
            "CPU and memory limits configured",
            "Best Practice",
        ),
        PolicyResult::new(
            "block-latest-tag",
            "block-latest",
            Pass,
            "Using specific image tag (not :latest)",
            "Best Practice",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_report_summary() {
        let report = mock_report();
        assert_eq!(report.results.len(), 5);
        assert_eq!(
            report.summary,
            PolicySummary { pass: 5, fail: 0, warn: 0, skip: 0 }
        );
    }

    #[test]
    fn test_summary_counts_each_status() {
        let results = vec![
            PolicyResult::new("p", "a", PolicyStatus::Fail, "", "Security"),
            PolicyResult::new("p", "b", PolicyStatus::Warn, "", "Security"),
            PolicyResult::new("p", "c", PolicyStatus::Warn, "", "Security"),
            PolicyResult::new("p", "d", PolicyStatus::Skip, "", "Security"),
        ];
        let summary = PolicySummary::from_results(&results);
        assert_eq!(summary, PolicySummary { pass: 0, fail: 1, warn: 2, skip: 1 });
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(PolicyStatus::Warn).unwrap(), "warn");
        assert_eq!(PolicyStatus::Skip.label(), "SKIP");
        assert_eq!(PolicyStatus::Fail.chip_color(), "#f44336");
    }
}
