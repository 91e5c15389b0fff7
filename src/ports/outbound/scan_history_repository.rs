use crate::shared::TrendError;
use crate::trend_tracking::domain::{
    ProjectKey, ProjectStats, ProjectSummary, ScanSnapshot, TrendOutcome,
};
use crate::trend_tracking::services::TrendDiffEngine;

/// ScanHistoryRepository port for retaining scan snapshots per project
///
/// Implementations must be `Send + Sync`: several modules of one build may be
/// scanned on separate threads and record into the same repository.
pub trait ScanHistoryRepository: Send + Sync {
    /// Records a completed scan under its project key
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the snapshot cannot be appended to its
    /// project's history (for example, it is older than the latest scan).
    fn store_scan_result(&self, snapshot: ScanSnapshot) -> Result<(), TrendError>;

    /// Returns up to `limit` snapshots, most recent first.
    /// Unknown projects yield an empty vector.
    fn get_scan_history(&self, project_key: &ProjectKey, limit: usize) -> Vec<ScanSnapshot>;

    /// Returns headline statistics, or `None` for a project with no retained scan
    fn get_project_stats(&self, project_key: &ProjectKey) -> Option<ProjectStats>;

    /// Lists every project that still has at least one retained scan
    fn get_all_projects(&self) -> Vec<ProjectSummary>;

    /// Computes the trend view of a project from its two most recent scans
    ///
    /// - no retained scan: `NoHistory`
    /// - one: `Baseline` listing of currently vulnerable dependencies
    /// - two or more: `Trending` diff against the immediately preceding scan
    fn trend(&self, project_key: &ProjectKey) -> TrendOutcome {
        TrendDiffEngine::outcome(&self.get_scan_history(project_key, 2))
    }
}
