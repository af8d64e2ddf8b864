//! Serialization for snapshot files and command output.
//!
//! Snapshots are read as JSON or YAML, chosen by file extension. Output is
//! written as deterministic JSON:
//! - Using 2-space indentation
//! - Adding trailing newline
//! - Keeping insertion order of scopes

mod json;
mod yaml;

use std::path::Path;

pub use json::{from_json, to_json_stable};
pub use yaml::from_yaml;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    JsonSerialize(serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    JsonDeserialize(serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// File format of a snapshot document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Detects the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Deserializes a document in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is invalid for the format.
    pub fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T, SerializationError> {
        match self {
            Self::Json => from_json(content),
            Self::Yaml => from_yaml(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/b.JSON")), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_path(Path::new("snap.yml")), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path(Path::new("snap.toml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("snapshot")), None);
    }
}
