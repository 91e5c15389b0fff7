use crate::ports::inbound::RawScanResult;
use crate::shared::Result;
use std::path::Path;

/// ScanResultReader port for loading scan results produced by a scanner
pub trait ScanResultReader {
    /// Reads and parses one scan result
    ///
    /// # Arguments
    /// * `path` - Location of the serialized scan result
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or fails the input file checks
    /// - The content is not a valid scan result document
    fn read_scan_result(&self, path: &Path) -> Result<RawScanResult>;
}
