//! Well-known deployment path constants (`{{P:...}}`)

use serde::{Deserialize, Serialize};

use super::scope::VariableScope;
use crate::os::OperatingSystem;

/// A directory of a deployed instance addressable with the `P` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialDirectory {
    /// Root directory of the instance.
    Root,
    /// Installed binaries of the active version.
    Bin,
    /// Configuration files of the active version.
    Config,
    /// Runtime scratch directory of the active version.
    Runtime,
    /// Persistent data shared across versions.
    Data,
    /// Log data shared across versions.
    LogData,
    /// Pool of manifests shared by all instances.
    ManifestPool,
    /// Pool of manifests private to the instance.
    InstanceManifestPool,
}

impl SpecialDirectory {
    /// All directories, in presentation order.
    pub const ALL: [Self; 8] = [
        Self::Root,
        Self::Bin,
        Self::Config,
        Self::Runtime,
        Self::Data,
        Self::LogData,
        Self::ManifestPool,
        Self::InstanceManifestPool,
    ];

    /// Returns the key used after `P:`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Bin => "BIN",
            Self::Config => "CONFIG",
            Self::Runtime => "RUNTIME",
            Self::Data => "DATA",
            Self::LogData => "LOG_DATA",
            Self::ManifestPool => "MANIFEST_POOL",
            Self::InstanceManifestPool => "INSTANCE_MANIFEST_POOL",
        }
    }

    /// Looks a directory up by its key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.key() == key)
    }

    /// Returns a short description for content assist.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Root => "Instance root directory",
            Self::Bin => "Installed binaries of the active version",
            Self::Config => "Configuration files of the active version",
            Self::Runtime => "Runtime directory of the active version",
            Self::Data => "Persistent instance data",
            Self::LogData => "Instance log data",
            Self::ManifestPool => "Shared manifest pool",
            Self::InstanceManifestPool => "Instance manifest pool",
        }
    }

    /// Path segments below the deployment root.
    fn segments<'a>(self, instance_id: &'a str, tag: &'a str) -> Vec<&'a str> {
        match self {
            Self::Root => vec![instance_id],
            Self::Bin => vec![instance_id, "bin", tag],
            Self::Config => vec![instance_id, "bin", tag, "config"],
            Self::Runtime => vec![instance_id, "bin", tag, "runtime"],
            Self::Data => vec![instance_id, "data"],
            Self::LogData => vec![instance_id, "log_data"],
            Self::ManifestPool => vec!["pool"],
            Self::InstanceManifestPool => vec![instance_id, "pool"],
        }
    }
}

/// Computes the directory layout of one deployed instance version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPaths {
    root: String,
    instance_id: String,
    tag: String,
}

impl DeploymentPaths {
    /// Creates the layout for an instance version below a deployment root.
    #[must_use]
    pub fn new(
        root: impl Into<String>,
        instance_id: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            instance_id: instance_id.into(),
            tag: tag.into(),
        }
    }

    /// Renders one directory using the separator of the target OS.
    /// Separators inside the root are rewritten to the target's as well.
    #[must_use]
    pub fn directory(&self, dir: SpecialDirectory, os: OperatingSystem) -> String {
        let separator = os.path_separator();
        let mut path: String = self
            .root
            .trim_end_matches(['/', '\\'])
            .chars()
            .map(|c| if c == '/' || c == '\\' { separator } else { c })
            .collect();
        for segment in dir.segments(&self.instance_id, &self.tag) {
            path.push(separator);
            path.push_str(segment);
        }
        path
    }

    /// Returns every directory as a scope keyed by `SpecialDirectory::key`.
    #[must_use]
    pub fn to_scope(&self, os: OperatingSystem) -> VariableScope {
        SpecialDirectory::ALL
            .into_iter()
            .map(|dir| (dir.key(), self.directory(dir, os)))
            .collect()
    }
}
