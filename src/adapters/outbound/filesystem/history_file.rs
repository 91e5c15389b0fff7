use crate::ports::outbound::HistoryPersistence;
use crate::shared::security::{validate_input_file, validate_output_target, MAX_INPUT_FILE_SIZE};
use crate::shared::Result;
use crate::trend_tracking::domain::ProjectHistory;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Layout version written to the state file
pub const STATE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateDocument {
    version: u32,
    #[serde(default)]
    projects: Vec<ProjectHistory>,
}

/// JsonHistoryFile adapter persisting histories as one JSON document
///
/// Writes go to a temporary file in the same directory which then replaces
/// the state file, so a crash mid-write leaves the previous state intact.
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryPersistence for JsonHistoryFile {
    fn save(&self, histories: &[ProjectHistory]) -> Result<()> {
        validate_output_target(&self.path)?;

        let parent = match self.path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };
        let document = StateDocument {
            version: STATE_FORMAT_VERSION,
            projects: histories.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&document)
            .context("Failed to serialize history state")?;

        let mut staged = NamedTempFile::new_in(parent).with_context(|| {
            format!(
                "Failed to stage history state in {}\n\n💡 Hint: Check that the directory exists and is writable.",
                parent.display()
            )
        })?;
        staged
            .write_all(&json)
            .with_context(|| format!("Failed to write history state: {}", self.path.display()))?;
        staged
            .persist(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to replace {}: {}", self.path.display(), e))?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<ProjectHistory>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        validate_input_file(&self.path, "history state", MAX_INPUT_FILE_SIZE)?;

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history state: {}", self.path.display()))?;
        let document: StateDocument = serde_json::from_str(&content).with_context(|| {
            format!(
                "Failed to parse history state: {}\n\n💡 Hint: Delete the file to start with an empty history.",
                self.path.display()
            )
        })?;

        if document.version != STATE_FORMAT_VERSION {
            anyhow::bail!(
                "Unsupported history state version {} in {} (expected {})",
                document.version,
                self.path.display(),
                STATE_FORMAT_VERSION
            );
        }
        Ok(document.projects)
    }
}
