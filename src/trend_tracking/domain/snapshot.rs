use super::coordinates::{Coordinates, ProjectKey};
use super::severity::{Severity, SeverityCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// State of one dependency at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySnapshot {
    coordinates: Coordinates,
    is_direct: bool,
    scope: String,
    vulnerability_ids: BTreeSet<String>,
    severity_by_vulnerability_id: BTreeMap<String, Severity>,
}

impl DependencySnapshot {
    pub fn new(coordinates: Coordinates, is_direct: bool, scope: impl Into<String>) -> Self {
        Self {
            coordinates,
            is_direct,
            scope: scope.into(),
            vulnerability_ids: BTreeSet::new(),
            severity_by_vulnerability_id: BTreeMap::new(),
        }
    }

    /// Adds a vulnerability id. Re-adding an id keeps the higher severity.
    pub fn with_vulnerability(mut self, id: impl Into<String>, severity: Severity) -> Self {
        self.add_vulnerability(id, severity);
        self
    }

    pub fn add_vulnerability(&mut self, id: impl Into<String>, severity: Severity) {
        let id = id.into();
        let entry = self
            .severity_by_vulnerability_id
            .entry(id.clone())
            .or_insert(severity);
        if severity > *entry {
            *entry = severity;
        }
        self.vulnerability_ids.insert(id);
    }

    /// Folds a second record of the same coordinates into this one: ids are
    /// unioned and the dependency is direct if either record is.
    fn absorb(&mut self, other: DependencySnapshot) {
        self.is_direct |= other.is_direct;
        for id in &other.vulnerability_ids {
            self.add_vulnerability(id.as_str(), other.severity_of(id));
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn is_direct(&self) -> bool {
        self.is_direct
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn vulnerability_ids(&self) -> &BTreeSet<String> {
        &self.vulnerability_ids
    }

    pub fn severity_by_vulnerability_id(&self) -> &BTreeMap<String, Severity> {
        &self.severity_by_vulnerability_id
    }

    /// Severity recorded for `id`, `Unknown` when the id has none.
    pub fn severity_of(&self, id: &str) -> Severity {
        self.severity_by_vulnerability_id
            .get(id)
            .copied()
            .unwrap_or(Severity::Unknown)
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.vulnerability_ids.is_empty()
    }

    pub fn vulnerability_count(&self) -> usize {
        self.vulnerability_ids.len()
    }
}

/// One completed scan. Immutable once built; every count is derived from
/// `dependencies` at construction time, including when loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredScanSnapshot")]
pub struct ScanSnapshot {
    project_key: ProjectKey,
    timestamp: DateTime<Utc>,
    total_dependencies: usize,
    vulnerable_dependency_count: usize,
    severity_counts: SeverityCounts,
    dependencies: Vec<DependencySnapshot>,
}

impl ScanSnapshot {
    /// Records sharing coordinates are merged into one dependency, in order of
    /// first appearance; the first record's scope is kept.
    pub fn new(
        project_key: ProjectKey,
        timestamp: DateTime<Utc>,
        dependencies: Vec<DependencySnapshot>,
    ) -> Self {
        let dependencies = merge_repeated(dependencies);
        let vulnerable_dependency_count = dependencies.iter().filter(|d| d.is_vulnerable()).count();
        let severity_counts = dependencies
            .iter()
            .flat_map(|d| d.vulnerability_ids().iter().map(move |id| d.severity_of(id)))
            .collect();

        Self {
            project_key,
            timestamp,
            total_dependencies: dependencies.len(),
            vulnerable_dependency_count,
            severity_counts,
            dependencies,
        }
    }

    pub fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn total_dependencies(&self) -> usize {
        self.total_dependencies
    }

    pub fn vulnerable_dependency_count(&self) -> usize {
        self.vulnerable_dependency_count
    }

    pub fn severity_counts(&self) -> &SeverityCounts {
        &self.severity_counts
    }

    /// Number of (dependency, vulnerability id) pairs in this scan.
    pub fn total_vulnerabilities(&self) -> usize {
        self.severity_counts.total()
    }

    pub fn dependencies(&self) -> &[DependencySnapshot] {
        &self.dependencies
    }

    pub fn vulnerable_dependencies(&self) -> impl Iterator<Item = &DependencySnapshot> {
        self.dependencies.iter().filter(|d| d.is_vulnerable())
    }

    pub fn dependency(&self, coordinates: &Coordinates) -> Option<&DependencySnapshot> {
        self.dependencies
            .iter()
            .find(|d| d.coordinates() == coordinates)
    }
}

fn merge_repeated(dependencies: Vec<DependencySnapshot>) -> Vec<DependencySnapshot> {
    let mut merged: Vec<DependencySnapshot> = Vec::with_capacity(dependencies.len());
    let mut position: HashMap<Coordinates, usize> = HashMap::new();
    for dependency in dependencies {
        match position.get(dependency.coordinates()) {
            Some(&index) => merged[index].absorb(dependency),
            None => {
                position.insert(dependency.coordinates().clone(), merged.len());
                merged.push(dependency);
            }
        }
    }
    merged
}

/// Stored form of a snapshot. Counts in storage are ignored and rebuilt.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredScanSnapshot {
    project_key: ProjectKey,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    dependencies: Vec<DependencySnapshot>,
}

impl From<StoredScanSnapshot> for ScanSnapshot {
    fn from(stored: StoredScanSnapshot) -> Self {
        ScanSnapshot::new(stored.project_key, stored.timestamp, stored.dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn coords(artifact: &str) -> Coordinates {
        Coordinates::new("com.example", artifact, "1.0").unwrap()
    }

    #[test]
    fn test_dependency_ids_are_a_set() {
        let dep = DependencySnapshot::new(coords("libA"), true, "compile")
            .with_vulnerability("CVE-1", Severity::Low)
            .with_vulnerability("CVE-1", Severity::High)
            .with_vulnerability("CVE-2", Severity::Medium);

        assert_eq!(dep.vulnerability_count(), 2);
        assert_eq!(dep.severity_of("CVE-1"), Severity::High);
        assert_eq!(dep.severity_of("CVE-404"), Severity::Unknown);
        assert!(dep.is_vulnerable());
    }

    #[test]
    fn test_scan_snapshot_derives_counts() {
        let deps = vec![
            DependencySnapshot::new(coords("libA"), true, "compile")
                .with_vulnerability("CVE-1", Severity::Critical)
                .with_vulnerability("CVE-2", Severity::Low),
            DependencySnapshot::new(coords("libB"), false, "runtime")
                .with_vulnerability("CVE-3", Severity::Unknown),
            DependencySnapshot::new(coords("libC"), false, "test"),
        ];
        let snapshot = ScanSnapshot::new(
            ProjectKey::new("com.example:app").unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            deps,
        );

        assert_eq!(snapshot.total_dependencies(), 3);
        assert_eq!(snapshot.vulnerable_dependency_count(), 2);
        assert_eq!(snapshot.severity_counts().critical, 1);
        assert_eq!(snapshot.severity_counts().low, 1);
        assert_eq!(snapshot.severity_counts().unknown, 1);
        assert_eq!(snapshot.total_vulnerabilities(), 3);
        assert_eq!(snapshot.vulnerable_dependencies().count(), 2);
        assert!(snapshot.dependency(&coords("libC")).is_some());
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let snapshot = ScanSnapshot::new(
            ProjectKey::new("com.example:app").unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Vec::new(),
        );
        assert_eq!(snapshot.total_dependencies(), 0);
        assert_eq!(snapshot.total_vulnerabilities(), 0);
    }

    #[test]
    fn test_snapshot_serializes_with_stable_field_names() {
        let snapshot = ScanSnapshot::new(
            ProjectKey::new("com.example:app").unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            vec![DependencySnapshot::new(coords("libA"), true, "compile")
                .with_vulnerability("CVE-1", Severity::High)],
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["projectKey"], "com.example:app");
        assert_eq!(value["vulnerableDependencyCount"], 1);
        assert_eq!(value["severityCounts"]["high"], 1);
        let dep = &value["dependencies"][0];
        assert_eq!(dep["isDirect"], true);
        assert_eq!(dep["vulnerabilityIds"][0], "CVE-1");
        assert_eq!(dep["severityByVulnerabilityId"]["CVE-1"], "HIGH");

        let restored: ScanSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_repeated_coordinates_are_merged() {
        let snapshot = ScanSnapshot::new(
            ProjectKey::new("com.example:app").unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            vec![
                DependencySnapshot::new(coords("libA"), false, "runtime")
                    .with_vulnerability("CVE-1", Severity::High),
                DependencySnapshot::new(coords("libB"), false, "compile"),
                DependencySnapshot::new(coords("libA"), true, "test")
                    .with_vulnerability("CVE-2", Severity::Low)
                    .with_vulnerability("CVE-1", Severity::Critical),
            ],
        );

        assert_eq!(snapshot.total_dependencies(), 2);
        assert_eq!(snapshot.vulnerable_dependency_count(), 1);
        assert_eq!(snapshot.total_vulnerabilities(), 2);
        assert_eq!(snapshot.severity_counts().critical, 1);
        assert_eq!(snapshot.severity_counts().low, 1);

        let lib_a = &snapshot.dependencies()[0];
        assert_eq!(lib_a.coordinates(), &coords("libA"));
        assert_eq!(lib_a.scope(), "runtime");
        assert!(lib_a.is_direct());
        assert_eq!(lib_a.severity_of("CVE-1"), Severity::Critical);
        assert_eq!(snapshot.dependencies()[1].coordinates(), &coords("libB"));
    }

    #[test]
    fn test_stored_counts_are_rebuilt_from_dependencies() {
        let snapshot = ScanSnapshot::new(
            ProjectKey::new("com.example:app").unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            vec![
                DependencySnapshot::new(coords("libA"), true, "compile")
                    .with_vulnerability("CVE-1", Severity::High),
                DependencySnapshot::new(coords("libB"), false, "compile"),
            ],
        );

        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["totalDependencies"] = serde_json::json!(40);
        value["vulnerableDependencyCount"] = serde_json::json!(12);
        value["severityCounts"]["critical"] = serde_json::json!(9);

        let restored: ScanSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(restored.total_dependencies(), 2);
        assert_eq!(restored.vulnerable_dependency_count(), 1);
        assert_eq!(restored.severity_counts().critical, 0);
        assert_eq!(restored, snapshot);
    }
}
