//! Target operating systems
//!
//! Each supported family has a fixed selector token usable inside expressions
//! (`{{LINUX:launch.sh}}`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An operating system family a process can be deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperatingSystem {
    /// Microsoft Windows.
    #[serde(rename = "WINDOWS")]
    Windows,
    /// Linux on x86-64.
    #[serde(rename = "LINUX")]
    Linux,
    /// Linux on 64-bit ARM.
    #[serde(rename = "LINUX_AARCH64")]
    LinuxAarch64,
    /// Apple macOS.
    #[serde(rename = "MACOS")]
    MacOs,
}

impl OperatingSystem {
    /// All supported families, in selector order.
    pub const ALL: [Self; 4] = [Self::Windows, Self::Linux, Self::LinuxAarch64, Self::MacOs];

    /// Returns the selector token used in expressions.
    #[must_use]
    pub const fn selector_token(self) -> &'static str {
        match self {
            Self::Windows => "WINDOWS",
            Self::Linux => "LINUX",
            Self::LinuxAarch64 => "LINUX_AARCH64",
            Self::MacOs => "MACOS",
        }
    }

    /// Maps an expression token to its family. Tokens are case-sensitive.
    #[must_use]
    pub fn from_selector_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|os| os.selector_token() == token)
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::LinuxAarch64 => "Linux (AArch64)",
            Self::MacOs => "macOS",
        }
    }

    /// Path separator used when rendering paths for this family.
    #[must_use]
    pub const fn path_separator(self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Linux | Self::LinuxAarch64 | Self::MacOs => '/',
        }
    }

    /// The family of the host running this code.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(all(target_os = "linux", target_arch = "aarch64")) {
            Self::LinuxAarch64
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector_token())
    }
}

impl FromStr for OperatingSystem {
    type Err = DomainError;

    /// Lenient parse for configuration input: case-insensitive, `-` and `_`
    /// interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "WINDOWS" | "WIN" => Ok(Self::Windows),
            "LINUX" => Ok(Self::Linux),
            "LINUX_AARCH64" | "AARCH64" => Ok(Self::LinuxAarch64),
            "MACOS" | "MAC" | "DARWIN" => Ok(Self::MacOs),
            _ => Err(DomainError::UnknownOperatingSystem(s.to_string())),
        }
    }
}
