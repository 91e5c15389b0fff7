use crate::application::dto::{TrendRequest, TrendResponse};
use crate::trend_tracking::domain::{ProjectKey, ProjectSummary};

/// TrendTrackingPort - Inbound port for the trend tracking use case
///
/// External adapters (CLI, build plugins, daemons) call this port after each
/// scan. Trend tracking is auxiliary to the scan itself, so none of these
/// methods fail: problems are reported inside the response instead.
pub trait TrendTrackingPort {
    /// Records the scan carried by `request` and reports the resulting trend
    fn record_scan(&self, request: TrendRequest) -> TrendResponse;

    /// Reports the current trend of a project without recording anything
    fn query(&self, project_key: &ProjectKey) -> TrendResponse;

    /// Lists projects with retained history
    fn list_projects(&self) -> Vec<ProjectSummary>;
}
