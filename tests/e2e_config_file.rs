/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

const AS_OF: &str = "2026-03-02T09:00:00Z";

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn parse_report(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("report is valid JSON")
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_history_bounds() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join("vuln-trend.config.yml"),
            "history:\n  max_sessions_per_project: 1\n",
        );

        let output = cargo_bin_cmd!("vuln-trend")
            .current_dir(dir.path())
            .args([
                fixture("shop-scan-1.json").as_str(),
                fixture("shop-scan-2.json").as_str(),
                "--as-of",
                AS_OF,
            ])
            .output()
            .unwrap();

        let report = parse_report(&output.stdout);
        assert_eq!(report[1]["outcome"]["state"], "baseline");
    }

    #[test]
    fn test_auto_discovery_applies_fail_on_new() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join("vuln-trend.config.yml"), "fail_on_new: true\n");

        cargo_bin_cmd!("vuln-trend")
            .current_dir(dir.path())
            .args([
                fixture("shop-scan-1.json").as_str(),
                fixture("shop-scan-2.json").as_str(),
                "--as-of",
                AS_OF,
            ])
            .assert()
            .code(1);
    }

    #[test]
    fn test_auto_discovery_state_file_is_relative_to_cwd() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join("vuln-trend.config.yml"),
            "state_file: history.json\n",
        );

        cargo_bin_cmd!("vuln-trend")
            .current_dir(dir.path())
            .args([fixture("shop-scan-1.json").as_str(), "--as-of", AS_OF])
            .assert()
            .code(0);

        assert!(dir.path().join("history.json").exists());
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = TempDir::new().unwrap();

        let output = cargo_bin_cmd!("vuln-trend")
            .current_dir(dir.path())
            .args([
                fixture("shop-scan-1.json").as_str(),
                fixture("shop-scan-2.json").as_str(),
                "--as-of",
                AS_OF,
            ])
            .output()
            .unwrap();

        assert!(output.status.success());
        let report = parse_report(&output.stdout);
        assert_eq!(report[1]["outcome"]["state"], "trending");
    }
}

// ============================================================================
// Explicit Config and Merging Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("custom.yml");
        write_config(&config_path, "format: markdown\n");

        cargo_bin_cmd!("vuln-trend")
            .args([
                fixture("shop-scan-1.json").as_str(),
                "--config",
                config_path.to_str().unwrap(),
                "--as-of",
                AS_OF,
            ])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("# Vulnerability Trend Report"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("custom.yml");
        write_config(
            &config_path,
            "format: markdown\nhistory:\n  max_sessions_per_project: 1\n",
        );

        let output = cargo_bin_cmd!("vuln-trend")
            .args([
                fixture("shop-scan-1.json").as_str(),
                fixture("shop-scan-2.json").as_str(),
                "--config",
                config_path.to_str().unwrap(),
                "--max-sessions",
                "5",
                "-f",
                "json",
                "--as-of",
                AS_OF,
            ])
            .output()
            .unwrap();

        let report = parse_report(&output.stdout);
        assert_eq!(report[1]["outcome"]["state"], "trending");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        cargo_bin_cmd!("vuln-trend")
            .args([
                fixture("shop-scan-1.json").as_str(),
                "--config",
                "/nonexistent/vuln-trend.config.yml",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_zero_bound_in_config_is_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("custom.yml");
        write_config(&config_path, "history:\n  max_projects: 0\n");

        cargo_bin_cmd!("vuln-trend")
            .args([
                fixture("shop-scan-1.json").as_str(),
                "--config",
                config_path.to_str().unwrap(),
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains(
                "history.max_projects must be greater than 0",
            ));
    }

    #[test]
    fn test_unknown_field_warns_but_succeeds() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("custom.yml");
        write_config(&config_path, "retention_days: 3\n");

        cargo_bin_cmd!("vuln-trend")
            .args([
                fixture("shop-scan-1.json").as_str(),
                "--config",
                config_path.to_str().unwrap(),
                "--as-of",
                AS_OF,
            ])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("unknown config field"));
    }
}
