use crate::application::dto::{SnapshotStatistics, TrendRequest, TrendResponse};
use crate::ports::inbound::TrendTrackingPort;
use crate::ports::outbound::ScanHistoryRepository;
use crate::trend_tracking::domain::{ProjectKey, ProjectStats, ProjectSummary};
use crate::trend_tracking::services::{
    new_vulnerability_breakdown, SeverityAggregator, SnapshotExtractor, TrendDiffEngine,
};
use tracing::{debug, warn};

/// TrackTrendUseCase - Records scans and reports vulnerability trends
///
/// Orchestrates extraction, retention and diffing through the
/// ScanHistoryRepository port.
///
/// Tracking failures never propagate: a scan that cannot be recorded is
/// logged and answered with an unavailable response, so the scan that
/// produced it is unaffected.
///
/// # Type Parameters
/// * `R` - ScanHistoryRepository implementation
pub struct TrackTrendUseCase<R> {
    repository: R,
}

impl<R: ScanHistoryRepository> TrackTrendUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Builds the full response for the current history of `project_key`
    ///
    /// Every part is derived from a single history read, so a concurrent
    /// record cannot make the statistics and the outcome disagree.
    fn build_response(&self, project_key: &ProjectKey) -> TrendResponse {
        let recent = self.repository.get_scan_history(project_key, usize::MAX);
        let outcome = TrendDiffEngine::outcome(&recent);

        let statistics = recent.first().map(SnapshotStatistics::from_snapshot);
        let trend_summary = outcome.trend_result().map(SeverityAggregator::summarize_trend);
        let new_breakdown = outcome
            .trend_result()
            .zip(recent.first())
            .map(|(result, current)| new_vulnerability_breakdown(result, current));

        TrendResponse {
            project_key: Some(project_key.clone()),
            outcome: Some(outcome),
            unavailable_reason: None,
            statistics,
            project_stats: ProjectStats::from_recent(&recent),
            trend_summary,
            new_vulnerability_breakdown: new_breakdown,
        }
    }
}

impl<R: ScanHistoryRepository> TrendTrackingPort for TrackTrendUseCase<R> {
    fn record_scan(&self, request: TrendRequest) -> TrendResponse {
        let snapshot = match SnapshotExtractor::extract(&request.scan) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "scan result rejected; trend unavailable");
                return TrendResponse::unavailable(None, e.to_string());
            }
        };

        let project_key = snapshot.project_key().clone();
        debug!(
            project = %project_key,
            dependencies = snapshot.total_dependencies(),
            vulnerabilities = snapshot.total_vulnerabilities(),
            "recording scan"
        );

        if let Err(e) = self.repository.store_scan_result(snapshot) {
            warn!(project = %project_key, error = %e, "failed to record scan; trend unavailable");
            return TrendResponse::unavailable(Some(project_key), e.to_string());
        }

        self.build_response(&project_key)
    }

    fn query(&self, project_key: &ProjectKey) -> TrendResponse {
        self.build_response(project_key)
    }

    fn list_projects(&self) -> Vec<ProjectSummary> {
        self.repository.get_all_projects()
    }
}
