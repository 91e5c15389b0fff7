pub mod severity_aggregator;
pub mod snapshot_extractor;
pub mod trend_diff_engine;

pub use severity_aggregator::{SeverityAggregator, SeverityDistribution, TrendSummary};
pub use snapshot_extractor::SnapshotExtractor;
pub use trend_diff_engine::{new_vulnerability_breakdown, TrendDiffEngine};
