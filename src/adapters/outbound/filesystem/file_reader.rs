use crate::ports::inbound::RawScanResult;
use crate::ports::outbound::ScanResultReader;
use crate::shared::security::{validate_input_file, MAX_INPUT_FILE_SIZE};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading scan result documents
///
/// This adapter implements the ScanResultReader port for JSON files on disk.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanResultReader for FileSystemReader {
    fn read_scan_result(&self, path: &Path) -> Result<RawScanResult> {
        if !path.exists() {
            anyhow::bail!(
                "Scan result file does not exist: {}\n\n💡 Hint: Pass the JSON document written by the scanner for this build.",
                path.display()
            );
        }

        validate_input_file(path, "scan result", MAX_INPUT_FILE_SIZE)?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scan result: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scan result: {}", path.display()))
    }
}
