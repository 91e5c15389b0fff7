use crate::trend_tracking::domain::{
    Coordinates, DependencySnapshot, ScanSnapshot, Severity, SeverityCounts, TrendResult,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Share of each severity bucket, in percent with one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityDistribution {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub unknown: f64,
}

/// Id-level totals of a trend diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub resolved_jar_count: usize,
    pub new_jar_count: usize,
    pub pending_jar_count: usize,
    pub resolved_vulnerability_count: usize,
    pub new_vulnerability_count: usize,
    pub persisting_vulnerability_count: usize,
}

/// SeverityAggregator computes display statistics from snapshots and diffs.
///
/// All functions are pure.
pub struct SeverityAggregator;

impl SeverityAggregator {
    pub fn severity_breakdown(dependency: &DependencySnapshot) -> SeverityCounts {
        dependency
            .vulnerability_ids()
            .iter()
            .map(|id| dependency.severity_of(id))
            .collect()
    }

    /// Highest-ranked severity among the dependency's ids, `Unknown` when clean.
    pub fn max_severity(dependency: &DependencySnapshot) -> Severity {
        dependency
            .vulnerability_ids()
            .iter()
            .map(|id| dependency.severity_of(id))
            .max()
            .unwrap_or(Severity::Unknown)
    }

    /// Dependency with the most vulnerabilities; ties go to the higher max
    /// severity, then to the smaller coordinate string.
    pub fn most_vulnerable(snapshot: &ScanSnapshot) -> Option<Coordinates> {
        snapshot
            .vulnerable_dependencies()
            .min_by(|a, b| Self::compare_by_exposure(a, b))
            .map(|dep| dep.coordinates().clone())
    }

    /// `vulnerable_ratio * 50 + vulnerability_density * 50`, rounded to one decimal.
    ///
    /// Not clamped: a project averaging more than one vulnerability per
    /// dependency scores above 100. Zero dependencies score 0.
    pub fn risk_score(snapshot: &ScanSnapshot) -> f64 {
        let total = snapshot.total_dependencies();
        if total == 0 {
            return 0.0;
        }
        let vulnerable_ratio = snapshot.vulnerable_dependency_count() as f64 / total as f64;
        let density = snapshot.total_vulnerabilities() as f64 / total as f64;
        round_one_decimal(vulnerable_ratio * 50.0 + density * 50.0)
    }

    pub fn severity_distribution(counts: &SeverityCounts) -> SeverityDistribution {
        let total = counts.total();
        if total == 0 {
            return SeverityDistribution::default();
        }
        let percent = |n: usize| round_one_decimal(n as f64 * 100.0 / total as f64);
        SeverityDistribution {
            critical: percent(counts.critical),
            high: percent(counts.high),
            medium: percent(counts.medium),
            low: percent(counts.low),
            unknown: percent(counts.unknown),
        }
    }

    pub fn summarize_trend(result: &TrendResult) -> TrendSummary {
        let all_jars = || {
            result
                .resolved_jars
                .iter()
                .chain(&result.new_vulnerable_jars)
                .chain(&result.pending_vulnerable_jars)
        };
        TrendSummary {
            resolved_jar_count: result.resolved_jars.len(),
            new_jar_count: result.new_vulnerable_jars.len(),
            pending_jar_count: result.pending_vulnerable_jars.len(),
            resolved_vulnerability_count: all_jars()
                .map(|j| j.resolved_vulnerability_ids.len())
                .sum(),
            new_vulnerability_count: all_jars().map(|j| j.new_vulnerability_ids.len()).sum(),
            persisting_vulnerability_count: all_jars()
                .map(|j| j.persisting_vulnerability_ids.len())
                .sum(),
        }
    }

    fn compare_by_exposure(a: &DependencySnapshot, b: &DependencySnapshot) -> Ordering {
        b.vulnerability_count()
            .cmp(&a.vulnerability_count())
            .then_with(|| Self::max_severity(b).rank().cmp(&Self::max_severity(a).rank()))
            .then_with(|| a.coordinates().cmp(b.coordinates()))
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
