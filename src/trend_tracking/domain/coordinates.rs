use crate::shared::TrendError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter;

/// Maximum length for any single coordinate part (security limit)
const MAX_PART_LENGTH: usize = 255;

fn validated_part(kind: &str, value: &str) -> Result<String, TrendError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrendError::invalid_input(format!(
            "dependency {} cannot be empty",
            kind
        )));
    }
    if value.len() > MAX_PART_LENGTH {
        return Err(TrendError::invalid_input(format!(
            "dependency {} is too long ({} bytes). Maximum allowed: {} bytes",
            kind,
            value.len(),
            MAX_PART_LENGTH
        )));
    }
    Ok(value.to_string())
}

/// Group / artifact / version triple identifying one resolved dependency.
///
/// Ordering follows the `group:artifact:version` display string, which is the
/// final tie-break wherever dependencies are sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    group: String,
    artifact: String,
    version: String,
}

impl Coordinates {
    pub fn new(group: &str, artifact: &str, version: &str) -> Result<Self, TrendError> {
        Ok(Self {
            group: validated_part("group", group)?,
            artifact: validated_part("artifact", artifact)?,
            version: validated_part("version", version)?,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn display_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.group
            .chars()
            .chain(iter::once(':'))
            .chain(self.artifact.chars())
            .chain(iter::once(':'))
            .chain(self.version.chars())
    }
}

impl Ord for Coordinates {
    fn cmp(&self, other: &Self) -> Ordering {
        // parts may themselves contain ':', so equal strings fall back to the fields
        self.display_chars()
            .cmp(other.display_chars())
            .then_with(|| {
                (&self.group, &self.artifact, &self.version).cmp(&(
                    &other.group,
                    &other.artifact,
                    &other.version,
                ))
            })
    }
}

impl PartialOrd for Coordinates {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Identity of a scanned project (`group:artifact`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectKey(String);

impl ProjectKey {
    pub fn new(key: &str) -> Result<Self, TrendError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(TrendError::invalid_argument("project key must not be empty"));
        }
        Ok(Self(key.to_string()))
    }

    pub fn from_parts(group: &str, artifact: &str) -> Result<Self, TrendError> {
        let (group, artifact) = (group.trim(), artifact.trim());
        if group.is_empty() || artifact.is_empty() {
            return Err(TrendError::invalid_input(
                "scan result lacks a project identity (group and artifact are required)",
            ));
        }
        Ok(Self(format!("{}:{}", group, artifact)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_display() {
        let coords = Coordinates::new("org.apache", "commons-text", "1.9").unwrap();
        assert_eq!(coords.to_string(), "org.apache:commons-text:1.9");
        assert_eq!(coords.group(), "org.apache");
        assert_eq!(coords.artifact(), "commons-text");
        assert_eq!(coords.version(), "1.9");
    }

    #[test]
    fn test_coordinates_trims_parts() {
        let coords = Coordinates::new(" g ", " a", "1.0 ").unwrap();
        assert_eq!(coords.to_string(), "g:a:1.0");
    }

    #[test]
    fn test_coordinates_empty_part_rejected() {
        assert!(Coordinates::new("", "a", "1").is_err());
        assert!(Coordinates::new("g", "  ", "1").is_err());
        assert!(matches!(
            Coordinates::new("g", "a", ""),
            Err(TrendError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_coordinates_too_long_rejected() {
        let long = "x".repeat(MAX_PART_LENGTH + 1);
        assert!(Coordinates::new("g", &long, "1").is_err());
    }

    #[test]
    fn test_coordinates_order_follows_display_string() {
        // tuple order would put "a" before "a.b"; the display string order
        // compares ':' (0x3A) against '.' (0x2E)
        let short = Coordinates::new("a", "x", "1").unwrap();
        let dotted = Coordinates::new("a.b", "x", "1").unwrap();
        assert_eq!(
            short.cmp(&dotted),
            short.to_string().cmp(&dotted.to_string())
        );
        assert!(dotted < short);
    }

    #[test]
    fn test_project_key_validation() {
        assert_eq!(ProjectKey::new(" com.acme:app ").unwrap().as_str(), "com.acme:app");
        assert!(matches!(
            ProjectKey::new("   "),
            Err(TrendError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_project_key_from_parts() {
        let key = ProjectKey::from_parts("com.acme", "app").unwrap();
        assert_eq!(key.to_string(), "com.acme:app");
        assert!(matches!(
            ProjectKey::from_parts("com.acme", ""),
            Err(TrendError::InvalidInput { .. })
        ));
    }
}
