use chrono::{DateTime, Duration, TimeZone, Utc};
use vuln_trend::prelude::*;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 10, 6, 0, 0).unwrap()
}

pub fn at_minutes(minutes: i64) -> DateTime<Utc> {
    t0() + Duration::minutes(minutes)
}

/// Builder for raw scan results as a scanner would emit them
pub struct ScanBuilder {
    scan: RawScanResult,
}

impl ScanBuilder {
    pub fn new(group: &str, artifact: &str, completed_at: DateTime<Utc>) -> Self {
        Self {
            scan: RawScanResult {
                project: Some(RawProjectIdentity {
                    group: group.to_string(),
                    artifact: artifact.to_string(),
                    version: None,
                }),
                completed_at,
                dependencies: Vec::new(),
                vulnerabilities: Vec::new(),
            },
        }
    }

    /// Adds a dependency `name:version` under group `org.example`
    pub fn dependency(mut self, coordinates: &str, ids: &[&str]) -> Self {
        let (artifact, version) = coordinates
            .split_once(':')
            .expect("coordinates must be artifact:version");
        self.scan.dependencies.push(RawDependency {
            group: "org.example".to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
            scope: None,
            direct: false,
            vulnerability_ids: ids.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn vulnerability(mut self, id: &str, severity: &str) -> Self {
        self.scan.vulnerabilities.push(RawVulnerability {
            id: id.to_string(),
            severity: Some(severity.to_string()),
            score: None,
        });
        self
    }

    pub fn build(self) -> RawScanResult {
        self.scan
    }

    pub fn request(self) -> TrendRequest {
        TrendRequest::new(self.scan)
    }
}

pub fn registry(policy: RetentionPolicy) -> (InMemoryProjectRegistry<ManualClock>, ManualClock) {
    let clock = ManualClock::new(t0());
    let registry = InMemoryProjectRegistry::new(policy, clock.clone()).unwrap();
    (registry, clock)
}

pub fn coordinates(value: &str) -> Coordinates {
    let (artifact, version) = value.split_once(':').unwrap();
    Coordinates::new("org.example", artifact, version).unwrap()
}
