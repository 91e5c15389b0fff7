//! vuln-trend - vulnerability history and dependency trend tracking
//!
//! This library retains a bounded history of dependency scan results per
//! project and reports how each project's vulnerability exposure changed
//! between its two most recent scans, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`trend_tracking`): Snapshots, retention policy, and the
//!   pure extraction, diff and aggregation services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vuln_trend::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let registry = InMemoryProjectRegistry::with_policy(RetentionPolicy::default())?;
//! let reader = FileSystemReader::new();
//!
//! // Create use case
//! let use_case = TrackTrendUseCase::new(registry);
//!
//! // Record a scan and render the trend
//! let scan = reader.read_scan_result(Path::new("scan.json"))?;
//! let response = use_case.record_scan(TrendRequest::new(scan));
//! let output = JsonFormatter::new().format(&[response])?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;
pub mod trend_tracking;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::clock::{ManualClock, SystemClock};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, JsonHistoryFile, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::memory::{InMemoryProjectRegistry, ScanRecordStore};
    pub use crate::application::dto::{SnapshotStatistics, TrendRequest, TrendResponse};
    pub use crate::application::use_cases::TrackTrendUseCase;
    pub use crate::ports::inbound::{
        RawDependency, RawProjectIdentity, RawScanResult, RawVulnerability, TrendTrackingPort,
    };
    pub use crate::ports::outbound::{
        Clock, HistoryPersistence, OutputPresenter, ReportFormatter, ScanHistoryRepository,
        ScanResultReader,
    };
    pub use crate::shared::{ExitCode, Result, TrendError};
    pub use crate::trend_tracking::domain::{
        BaselineListing, Coordinates, DependencySnapshot, JarDiff, ProjectHistory, ProjectKey,
        ProjectStats, ProjectSummary, ScanSnapshot, Severity, SeverityCounts, SeverityTrend,
        TrendOutcome, TrendResult, TrendState, VulnerableJar,
    };
    pub use crate::trend_tracking::policies::RetentionPolicy;
    pub use crate::trend_tracking::services::{
        SeverityAggregator, SnapshotExtractor, TrendDiffEngine,
    };
}
