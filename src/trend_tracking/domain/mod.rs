pub mod coordinates;
pub mod project_history;
pub mod project_stats;
pub mod severity;
pub mod snapshot;
pub mod trend;

pub use coordinates::{Coordinates, ProjectKey};
pub use project_history::ProjectHistory;
pub use project_stats::{ProjectStats, ProjectSummary};
pub use severity::{Severity, SeverityCounts};
pub use snapshot::{DependencySnapshot, ScanSnapshot};
pub use trend::{
    BaselineListing, JarDiff, SeverityTrend, TrendOutcome, TrendResult, TrendState, VulnerableJar,
};
