use crate::trend_tracking::domain::{
    Coordinates, ProjectKey, ProjectStats, ScanSnapshot, SeverityCounts, TrendOutcome,
};
use crate::trend_tracking::services::{SeverityAggregator, SeverityDistribution, TrendSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headline figures of the most recent snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStatistics {
    pub scan_time: DateTime<Utc>,
    pub total_dependencies: usize,
    pub vulnerable_dependencies: usize,
    pub total_vulnerabilities: usize,
    pub severity_counts: SeverityCounts,
    pub severity_distribution: SeverityDistribution,
    pub risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_vulnerable: Option<Coordinates>,
}

impl SnapshotStatistics {
    pub fn from_snapshot(snapshot: &ScanSnapshot) -> Self {
        let severity_counts = *snapshot.severity_counts();
        Self {
            scan_time: snapshot.timestamp(),
            total_dependencies: snapshot.total_dependencies(),
            vulnerable_dependencies: snapshot.vulnerable_dependency_count(),
            total_vulnerabilities: snapshot.total_vulnerabilities(),
            severity_distribution: SeverityAggregator::severity_distribution(&severity_counts),
            severity_counts,
            risk_score: SeverityAggregator::risk_score(snapshot),
            most_vulnerable: SeverityAggregator::most_vulnerable(snapshot),
        }
    }
}

/// TrendResponse - Internal response DTO from the trend tracking use case
///
/// When tracking fails the response is `unavailable`: the outcome is absent
/// and `unavailable_reason` says why. Callers treat that as "no trend", never
/// as a failed scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<ProjectKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TrendOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SnapshotStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_stats: Option<ProjectStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_summary: Option<TrendSummary>,
    /// Severity split of ids that appeared since the previous scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_vulnerability_breakdown: Option<SeverityCounts>,
}

impl TrendResponse {
    pub fn unavailable(project_key: Option<ProjectKey>, reason: impl Into<String>) -> Self {
        Self {
            project_key,
            outcome: None,
            unavailable_reason: Some(reason.into()),
            statistics: None,
            project_stats: None,
            trend_summary: None,
            new_vulnerability_breakdown: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.outcome.is_some()
    }

    /// True when the latest scan introduced ids absent from the one before
    pub fn has_new_vulnerabilities(&self) -> bool {
        self.outcome
            .as_ref()
            .and_then(TrendOutcome::trend_result)
            .is_some_and(|result| result.has_new_vulnerabilities())
    }
}
