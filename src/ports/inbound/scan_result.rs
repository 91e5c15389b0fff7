use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scope assumed for dependency records that do not name one
pub const DEFAULT_SCOPE: &str = "compile";

/// Scan result as handed over by the scanning engine.
///
/// This is the only shape the history core consumes; how the engine produced
/// it (and where its vulnerability data came from) is not its concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScanResult {
    /// Identity of the scanned project. A result without one is rejected.
    #[serde(default)]
    pub project: Option<RawProjectIdentity>,
    /// When the scan completed; becomes the snapshot timestamp.
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub dependencies: Vec<RawDependency>,
    #[serde(default)]
    pub vulnerabilities: Vec<RawVulnerability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProjectIdentity {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub direct: bool,
    #[serde(default)]
    pub vulnerability_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVulnerability {
    pub id: String,
    /// Qualitative label such as `HIGH`; may be absent.
    #[serde(default)]
    pub severity: Option<String>,
    /// Numeric CVSS score, used when the label is missing or unrecognized.
    #[serde(default)]
    pub score: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_scan_result() {
        let json = r#"{
            "project": { "group": "com.acme", "artifact": "shop" },
            "completedAt": "2026-04-01T10:00:00Z"
        }"#;

        let raw: RawScanResult = serde_json::from_str(json).unwrap();
        let project = raw.project.unwrap();
        assert_eq!(project.group, "com.acme");
        assert!(project.version.is_none());
        assert!(raw.dependencies.is_empty());
        assert!(raw.vulnerabilities.is_empty());
    }

    #[test]
    fn test_deserialize_full_scan_result() {
        let json = r#"{
            "project": { "group": "com.acme", "artifact": "shop", "version": "2.0.0" },
            "completedAt": "2026-04-01T10:00:00Z",
            "dependencies": [
                { "group": "org.yaml", "artifact": "snakeyaml", "version": "1.33",
                  "scope": "runtime", "direct": true, "vulnerabilityIds": ["CVE-2022-1471"] }
            ],
            "vulnerabilities": [
                { "id": "CVE-2022-1471", "severity": "HIGH", "score": 8.3 }
            ]
        }"#;

        let raw: RawScanResult = serde_json::from_str(json).unwrap();
        assert_eq!(raw.dependencies.len(), 1);
        assert!(raw.dependencies[0].direct);
        assert_eq!(raw.dependencies[0].scope.as_deref(), Some("runtime"));
        assert_eq!(raw.vulnerabilities[0].score, Some(8.3));
    }

    #[test]
    fn test_missing_project_deserializes_as_none() {
        let json = r#"{ "completedAt": "2026-04-01T10:00:00Z" }"#;
        let raw: RawScanResult = serde_json::from_str(json).unwrap();
        assert!(raw.project.is_none());
    }
}
