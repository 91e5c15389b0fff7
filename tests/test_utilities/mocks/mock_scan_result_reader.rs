use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vuln_trend::prelude::*;

/// Mock ScanResultReader serving scan results registered per path
pub struct MockScanResultReader {
    results: HashMap<PathBuf, RawScanResult>,
}

impl MockScanResultReader {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
        }
    }

    pub fn with_result(mut self, path: &str, scan: RawScanResult) -> Self {
        self.results.insert(PathBuf::from(path), scan);
        self
    }
}

impl ScanResultReader for MockScanResultReader {
    fn read_scan_result(&self, path: &Path) -> Result<RawScanResult> {
        self.results
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock scan result not found: {}", path.display()))
    }
}
