use crate::ports::inbound::{RawScanResult, DEFAULT_SCOPE};
use crate::shared::TrendError;
use crate::trend_tracking::domain::{
    Coordinates, DependencySnapshot, ProjectKey, ScanSnapshot, Severity,
};
use std::collections::HashMap;

/// SnapshotExtractor normalizes a raw scan result into a `ScanSnapshot`.
///
/// Pure and deterministic: no I/O, and the same input always yields the same
/// snapshot. Dependency order follows first appearance in the raw result;
/// repeated records keep the first scope and are direct if any record is.
pub struct SnapshotExtractor;

impl SnapshotExtractor {
    /// # Errors
    /// `InvalidInput` when the result has no project identity or a dependency
    /// record has blank coordinates. An empty dependency list is valid.
    pub fn extract(raw: &RawScanResult) -> Result<ScanSnapshot, TrendError> {
        let project = raw.project.as_ref().ok_or_else(|| {
            TrendError::invalid_input("scan result lacks a project identity")
        })?;
        let project_key = ProjectKey::from_parts(&project.group, &project.artifact)?;

        let severities = Self::severity_index(raw);

        let mut dependencies = Vec::with_capacity(raw.dependencies.len());
        for record in &raw.dependencies {
            let coordinates = Coordinates::new(&record.group, &record.artifact, &record.version)?;
            let scope = record
                .scope
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SCOPE);

            let mut dependency = DependencySnapshot::new(coordinates, record.direct, scope);
            for id in record.vulnerability_ids.iter().map(|id| id.trim()) {
                if id.is_empty() {
                    continue;
                }
                let severity = severities.get(id).copied().unwrap_or(Severity::Unknown);
                dependency.add_vulnerability(id, severity);
            }
            dependencies.push(dependency);
        }

        // repeated records of one dependency are merged by the snapshot
        Ok(ScanSnapshot::new(project_key, raw.completed_at, dependencies))
    }

    /// Severity per vulnerability id. Repeated records keep the highest severity.
    fn severity_index(raw: &RawScanResult) -> HashMap<&str, Severity> {
        let mut index: HashMap<&str, Severity> = HashMap::new();
        for vulnerability in &raw.vulnerabilities {
            let severity = Severity::resolve(vulnerability.severity.as_deref(), vulnerability.score);
            index
                .entry(vulnerability.id.trim())
                .and_modify(|s| *s = (*s).max(severity))
                .or_insert(severity);
        }
        index
    }
}
