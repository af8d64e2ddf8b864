//! Configuration snapshot adapter
//!
//! Loads a snapshot file and serves it through the `ScopeRegistry` port.

mod document;
mod registry;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::serialization::{DocumentFormat, SerializationError};

pub use document::{
    ConfigurationSnapshot, InstanceDocument, ProcessDocument, ScalarMap, ScalarValue,
    SystemDocument,
};
pub use registry::SnapshotRegistry;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The snapshot path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported snapshot format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The content does not deserialize.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The content is structurally invalid.
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Loads and checks a snapshot file. The format follows the extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension,
/// does not deserialize, or repeats an identifier.
pub fn load_snapshot(path: &Path) -> Result<ConfigurationSnapshot, SnapshotError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| SnapshotError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: ConfigurationSnapshot = format.parse(&content)?;
    check_identifiers(&snapshot)?;

    debug!(
        path = %path.display(),
        ?format,
        systems = snapshot.systems.len(),
        instances = snapshot.instances.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Rejects repeated system, instance or per-instance process ids.
///
/// # Errors
///
/// Returns `SnapshotError::Invalid` naming the first repeated id.
pub fn check_identifiers(snapshot: &ConfigurationSnapshot) -> Result<(), SnapshotError> {
    ensure_unique("system", snapshot.systems.iter().map(|s| s.id.as_str()))?;
    ensure_unique("instance", snapshot.instances.iter().map(|i| i.id.as_str()))?;
    for instance in &snapshot.instances {
        let kind = format!("process in instance '{}'", instance.id);
        ensure_unique(&kind, instance.processes.iter().map(|p| p.id.as_str()))?;
    }
    Ok(())
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SnapshotError::Invalid(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}
