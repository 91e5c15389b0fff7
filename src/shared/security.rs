use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a scan result or history state file (64 MB)
pub const MAX_INPUT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Validates that an input file is a regular file (not a symlink or directory)
/// and that its size is within `max_size`.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description used in error messages (e.g., "scan result")
/// * `max_size` - Maximum allowed size in bytes
///
/// # Errors
/// Returns an error if:
/// - The metadata cannot be read (including a missing file)
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `max_size`
pub fn validate_input_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(())
}

/// Rejects writing through a symbolic link. A missing target is fine.
pub fn validate_output_target(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
            path.display()
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("scan.json");
        fs::write(&file_path, "{}").unwrap();

        assert!(validate_input_file(&file_path, "scan result", MAX_INPUT_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_validate_input_file_missing() {
        let path = PathBuf::from("/nonexistent/scan.json");
        let err = validate_input_file(&path, "scan result", MAX_INPUT_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("Failed to read scan result metadata"));
    }

    #[test]
    fn test_validate_input_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err =
            validate_input_file(temp_dir.path(), "scan result", MAX_INPUT_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_input_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("scan.json");
        fs::write(&file_path, "0123456789").unwrap();

        let err = validate_input_file(&file_path, "scan result", 4).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_input_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = validate_input_file(&link, "scan result", MAX_INPUT_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
        assert!(validate_output_target(&link).is_err());
    }

    #[test]
    fn test_validate_output_target_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_output_target(&temp_dir.path().join("state.json")).is_ok());
    }
}
