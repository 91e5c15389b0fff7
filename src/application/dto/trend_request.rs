use crate::ports::inbound::RawScanResult;

/// TrendRequest - Internal request DTO for the trend tracking use case
///
/// Carries one completed scan as handed over by the scanning engine.
#[derive(Debug, Clone)]
pub struct TrendRequest {
    pub scan: RawScanResult,
}

impl TrendRequest {
    pub fn new(scan: RawScanResult) -> Self {
        Self { scan }
    }
}
