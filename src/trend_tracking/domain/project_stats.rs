use super::coordinates::ProjectKey;
use super::project_history::ProjectHistory;
use super::snapshot::ScanSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline numbers for one project's retained history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub project_key: ProjectKey,
    pub current_vulnerability_count: usize,
    /// Change against the immediately preceding snapshot; 0 without one.
    pub trend_delta: i64,
    pub total_scans: usize,
    pub last_scan_time: DateTime<Utc>,
    pub previous_scan_time: Option<DateTime<Utc>>,
}

impl ProjectStats {
    /// `None` when the history holds no snapshot.
    pub fn from_history(history: &ProjectHistory) -> Option<Self> {
        Some(Self::build(history.latest()?, history.previous(), history.len()))
    }

    /// Stats of a full history listed most recent first, as the repository
    /// hands it out. `None` when the list is empty.
    pub fn from_recent(snapshots: &[ScanSnapshot]) -> Option<Self> {
        Some(Self::build(snapshots.first()?, snapshots.get(1), snapshots.len()))
    }

    fn build(
        latest: &ScanSnapshot,
        previous: Option<&ScanSnapshot>,
        total_scans: usize,
    ) -> Self {
        let current_count = latest.total_vulnerabilities();
        let trend_delta = previous
            .map(|p| current_count as i64 - p.total_vulnerabilities() as i64)
            .unwrap_or(0);

        Self {
            project_key: latest.project_key().clone(),
            current_vulnerability_count: current_count,
            trend_delta,
            total_scans,
            last_scan_time: latest.timestamp(),
            previous_scan_time: previous.map(|p| p.timestamp()),
        }
    }
}

/// One row of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_key: ProjectKey,
    pub last_scan_time: DateTime<Utc>,
    pub last_vulnerability_count: usize,
}

impl ProjectSummary {
    pub fn from_history(history: &ProjectHistory) -> Option<Self> {
        let latest = history.latest()?;
        Some(Self {
            project_key: history.project_key().clone(),
            last_scan_time: latest.timestamp(),
            last_vulnerability_count: latest.total_vulnerabilities(),
        })
    }
}
