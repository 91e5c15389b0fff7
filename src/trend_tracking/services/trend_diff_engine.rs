use super::severity_aggregator::SeverityAggregator;
use crate::trend_tracking::domain::{
    BaselineListing, Coordinates, DependencySnapshot, JarDiff, ScanSnapshot, Severity,
    SeverityCounts, SeverityTrend, TrendOutcome, TrendResult, VulnerableJar,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Resolved,
    New,
    Pending,
}

/// TrendDiffEngine classifies dependencies across two successive snapshots.
///
/// Only dependencies with a non-empty vulnerability set in at least one of the
/// two snapshots appear in the result, each in exactly one category:
/// - **resolved**: vulnerable before, clean (or gone) now
/// - **new**: clean (or absent) before, vulnerable now
/// - **pending**: vulnerable in both; ids split into resolved / new / persisting
///
/// Within a category entries are ordered by relevant id count (desc), then
/// max severity rank (desc), then coordinate string (asc).
pub struct TrendDiffEngine;

impl TrendDiffEngine {
    /// Trend view from a project's most recent snapshots, newest first.
    ///
    /// Only the first two entries are looked at.
    pub fn outcome(recent: &[ScanSnapshot]) -> TrendOutcome {
        match recent {
            [] => TrendOutcome::NoHistory,
            [only] => TrendOutcome::Baseline(Self::baseline(only)),
            [current, previous, ..] => TrendOutcome::Trending(Self::diff(previous, current)),
        }
    }

    pub fn diff(previous: &ScanSnapshot, current: &ScanSnapshot) -> TrendResult {
        let before = Self::vulnerable_index(previous);
        let after = Self::vulnerable_index(current);
        let keys: BTreeSet<&Coordinates> = before.keys().chain(after.keys()).copied().collect();

        let mut resolved = Vec::new();
        let mut new = Vec::new();
        let mut pending = Vec::new();

        for key in keys {
            let prev = before.get(key).copied();
            let cur = after.get(key).copied();
            let category = match (prev, cur) {
                (Some(_), None) => Category::Resolved,
                (None, Some(_)) => Category::New,
                (Some(_), Some(_)) => Category::Pending,
                (None, None) => continue,
            };
            let jar = Self::jar_diff(key, prev, cur);
            match category {
                Category::Resolved => resolved.push(jar),
                Category::New => new.push(jar),
                Category::Pending => pending.push(jar),
            }
        }

        Self::sort_category(&mut resolved, Category::Resolved);
        Self::sort_category(&mut new, Category::New);
        Self::sort_category(&mut pending, Category::Pending);

        TrendResult {
            previous_scan_time: previous.timestamp(),
            current_scan_time: current.timestamp(),
            resolved_jars: resolved,
            new_vulnerable_jars: new,
            pending_vulnerable_jars: pending,
            total_jars_analyzed: current.total_dependencies(),
            severity_trend: SeverityTrend::between(
                previous.severity_counts(),
                current.severity_counts(),
            ),
        }
    }

    /// Listing for a project with a single snapshot: every currently
    /// vulnerable dependency, ordered like the `new` category of a diff.
    pub fn baseline(snapshot: &ScanSnapshot) -> BaselineListing {
        let mut vulnerable_jars: Vec<VulnerableJar> = snapshot
            .vulnerable_dependencies()
            .map(|dep| VulnerableJar {
                coordinates: dep.coordinates().clone(),
                vulnerability_ids: dep.vulnerability_ids().clone(),
                severity_breakdown: SeverityAggregator::severity_breakdown(dep),
                max_severity: SeverityAggregator::max_severity(dep),
            })
            .collect();

        vulnerable_jars.sort_by(|a, b| {
            Self::rank_order(
                (a.vulnerability_ids.len(), a.max_severity, &a.coordinates),
                (b.vulnerability_ids.len(), b.max_severity, &b.coordinates),
            )
        });

        BaselineListing {
            scan_time: snapshot.timestamp(),
            total_jars_analyzed: snapshot.total_dependencies(),
            vulnerable_jars,
        }
    }

    fn vulnerable_index(snapshot: &ScanSnapshot) -> BTreeMap<&Coordinates, &DependencySnapshot> {
        snapshot
            .vulnerable_dependencies()
            .map(|dep| (dep.coordinates(), dep))
            .collect()
    }

    fn jar_diff(
        coordinates: &Coordinates,
        prev: Option<&DependencySnapshot>,
        cur: Option<&DependencySnapshot>,
    ) -> JarDiff {
        let empty = BTreeSet::new();
        let previous_ids = prev.map(|d| d.vulnerability_ids()).unwrap_or(&empty);
        let current_ids = cur.map(|d| d.vulnerability_ids()).unwrap_or(&empty);

        let severity_breakdown = cur
            .map(SeverityAggregator::severity_breakdown)
            .unwrap_or_default();
        let max_severity = match (cur, prev) {
            (Some(dep), _) => SeverityAggregator::max_severity(dep),
            (None, Some(dep)) => SeverityAggregator::max_severity(dep),
            (None, None) => Severity::Unknown,
        };

        JarDiff {
            coordinates: coordinates.clone(),
            previous_vulnerability_ids: previous_ids.clone(),
            current_vulnerability_ids: current_ids.clone(),
            resolved_vulnerability_ids: previous_ids.difference(current_ids).cloned().collect(),
            new_vulnerability_ids: current_ids.difference(previous_ids).cloned().collect(),
            persisting_vulnerability_ids: previous_ids.intersection(current_ids).cloned().collect(),
            severity_breakdown,
            max_severity,
        }
    }

    fn relevant_count(jar: &JarDiff, category: Category) -> usize {
        match category {
            Category::Resolved => jar.resolved_vulnerability_ids.len(),
            Category::New => jar.new_vulnerability_ids.len(),
            Category::Pending => jar.current_vulnerability_ids.len(),
        }
    }

    fn sort_category(jars: &mut [JarDiff], category: Category) {
        jars.sort_by(|a, b| {
            Self::rank_order(
                (Self::relevant_count(a, category), a.max_severity, &a.coordinates),
                (Self::relevant_count(b, category), b.max_severity, &b.coordinates),
            )
        });
    }

    fn rank_order(
        a: (usize, Severity, &Coordinates),
        b: (usize, Severity, &Coordinates),
    ) -> Ordering {
        b.0.cmp(&a.0)
            .then_with(|| b.1.rank().cmp(&a.1.rank()))
            .then_with(|| a.2.cmp(b.2))
    }
}

/// Severity counts of the ids that appeared since the previous snapshot.
pub fn new_vulnerability_breakdown(result: &TrendResult, current: &ScanSnapshot) -> SeverityCounts {
    result
        .new_vulnerable_jars
        .iter()
        .chain(result.pending_vulnerable_jars.iter())
        .flat_map(|jar| {
            let dep = current.dependency(&jar.coordinates);
            jar.new_vulnerability_ids
                .iter()
                .map(move |id| dep.map(|d| d.severity_of(id)).unwrap_or(Severity::Unknown))
        })
        .collect()
}
