/// Inbound ports (Driving ports) - Scan input and use case interfaces
///
/// These ports define what the scanning engine hands over and what external
/// adapters (e.g., CLI) call into.
pub mod scan_result;
pub mod trend_tracking_port;

pub use scan_result::{
    RawDependency, RawProjectIdentity, RawScanResult, RawVulnerability, DEFAULT_SCOPE,
};
pub use trend_tracking_port::TrendTrackingPort;
