use super::coordinates::Coordinates;
use super::severity::{Severity, SeverityCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-dependency entry of a trend diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JarDiff {
    pub coordinates: Coordinates,
    pub previous_vulnerability_ids: BTreeSet<String>,
    pub current_vulnerability_ids: BTreeSet<String>,
    pub resolved_vulnerability_ids: BTreeSet<String>,
    pub new_vulnerability_ids: BTreeSet<String>,
    pub persisting_vulnerability_ids: BTreeSet<String>,
    /// Counts per severity among the current ids.
    pub severity_breakdown: SeverityCounts,
    /// Highest severity among the current ids; for a fully resolved
    /// dependency, highest among the ids it used to have.
    pub max_severity: Severity,
}

/// Signed per-bucket differences `current - previous`.
/// Positive is a regression, negative an improvement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityTrend {
    pub total: i64,
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

impl SeverityTrend {
    pub fn between(previous: &SeverityCounts, current: &SeverityCounts) -> Self {
        fn delta(previous: usize, current: usize) -> i64 {
            current as i64 - previous as i64
        }
        Self {
            total: delta(previous.total(), current.total()),
            critical: delta(previous.critical, current.critical),
            high: delta(previous.high, current.high),
            medium: delta(previous.medium, current.medium),
            low: delta(previous.low, current.low),
        }
    }

    pub fn is_regression(&self) -> bool {
        self.total > 0
    }

    pub fn is_improvement(&self) -> bool {
        self.total < 0
    }
}

/// Classified diff of two successive snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub previous_scan_time: DateTime<Utc>,
    pub current_scan_time: DateTime<Utc>,
    pub resolved_jars: Vec<JarDiff>,
    pub new_vulnerable_jars: Vec<JarDiff>,
    pub pending_vulnerable_jars: Vec<JarDiff>,
    /// Dependencies in the current snapshot, clean ones included.
    pub total_jars_analyzed: usize,
    pub severity_trend: SeverityTrend,
}

impl TrendResult {
    pub fn has_new_vulnerabilities(&self) -> bool {
        !self.new_vulnerable_jars.is_empty()
            || self
                .pending_vulnerable_jars
                .iter()
                .any(|jar| !jar.new_vulnerability_ids.is_empty())
    }
}

/// A currently vulnerable dependency, as listed when only a baseline exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerableJar {
    pub coordinates: Coordinates,
    pub vulnerability_ids: BTreeSet<String>,
    pub severity_breakdown: SeverityCounts,
    pub max_severity: Severity,
}

/// Listing produced from the single retained snapshot of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineListing {
    pub scan_time: DateTime<Utc>,
    pub total_jars_analyzed: usize,
    pub vulnerable_jars: Vec<VulnerableJar>,
}

/// Which trend the caller can report for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendState {
    NoHistory,
    Baseline,
    Trending,
}

/// Trend view of a project, by how much history it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TrendOutcome {
    /// No retained snapshots.
    NoHistory,
    /// Exactly one retained snapshot; there is nothing to diff against.
    Baseline(BaselineListing),
    /// Two or more; diff of the two most recent.
    Trending(TrendResult),
}

impl TrendOutcome {
    pub fn state(&self) -> TrendState {
        match self {
            TrendOutcome::NoHistory => TrendState::NoHistory,
            TrendOutcome::Baseline(_) => TrendState::Baseline,
            TrendOutcome::Trending(_) => TrendState::Trending,
        }
    }

    pub fn trend_result(&self) -> Option<&TrendResult> {
        match self {
            TrendOutcome::Trending(result) => Some(result),
            _ => None,
        }
    }
}
