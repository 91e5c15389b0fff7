/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod trend_request;
mod trend_response;

pub use trend_request::TrendRequest;
pub use trend_response::{SnapshotStatistics, TrendResponse};
