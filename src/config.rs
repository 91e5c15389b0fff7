//! Configuration file support for vuln-trend.
//!
//! Provides YAML-based configuration through `vuln-trend.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::shared::Result;
use crate::trend_tracking::policies::RetentionPolicy;

pub const CONFIG_FILENAME: &str = "vuln-trend.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub history: Option<HistoryConfig>,
    /// Where recorded history is kept between runs.
    pub state_file: Option<PathBuf>,
    pub fail_on_new: Option<bool>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Retention bounds; absent values keep their defaults.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryConfig {
    pub max_projects: Option<usize>,
    pub max_sessions_per_project: Option<usize>,
    pub ttl_hours: Option<u32>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Applies the `history` section on top of `base`.
    pub fn apply_retention(&self, base: RetentionPolicy) -> RetentionPolicy {
        let Some(history) = &self.history else {
            return base;
        };
        let mut policy = base;
        if let Some(max_projects) = history.max_projects {
            policy = policy.with_max_projects(max_projects);
        }
        if let Some(max_sessions) = history.max_sessions_per_project {
            policy = policy.with_max_sessions_per_project(max_sessions);
        }
        if let Some(ttl_hours) = history.ttl_hours {
            policy = policy.with_ttl_hours(ttl_hours);
        }
        policy
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // an empty document parses as null rather than an empty mapping
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(history) = &config.history {
        let zero_field = [
            ("max_projects", history.max_projects.map(|v| v as u64)),
            (
                "max_sessions_per_project",
                history.max_sessions_per_project.map(|v| v as u64),
            ),
            ("ttl_hours", history.ttl_hours.map(u64::from)),
        ]
        .into_iter()
        .find(|(_, value)| *value == Some(0));

        if let Some((field, _)) = zero_field {
            bail!(
                "Invalid config: history.{} must be greater than 0.\n\n\
                 💡 Hint: Remove the field to use the default.",
                field
            );
        }
    }

    if let Some(format) = &config.format {
        if !matches!(format.to_lowercase().as_str(), "json" | "markdown" | "md") {
            bail!(
                "Invalid config: format '{}' is not supported.\n\n\
                 💡 Hint: Use 'json' or 'markdown'.",
                format
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "unknown config field will be ignored");
    }
    if let Some(history) = &config.history {
        for key in history.unknown_fields.keys() {
            warn!(field = %format!("history.{}", key), "unknown config field will be ignored");
        }
    }
}
