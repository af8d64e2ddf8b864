//! Engine Settings Domain Model
//!
//! Tunables for expression resolution. Defaults are conservative and every
//! field may be omitted when deserializing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Default bound on nested expansion of variable values.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default bound on the number of placeholders expanded by one resolution call.
pub const DEFAULT_MAX_EXPANSIONS: usize = 4096;

/// How placeholders with an unrecognized token are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTokenPolicy {
    /// Keep the placeholder verbatim and report an `UnknownToken` diagnostic.
    #[default]
    Diagnose,
    /// Keep the placeholder verbatim as literal text, without a diagnostic.
    PassThrough,
}

impl UnknownTokenPolicy {
    /// Returns true if unknown tokens produce diagnostics.
    #[must_use]
    pub const fn reports(self) -> bool {
        matches!(self, Self::Diagnose)
    }

    /// Returns the configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diagnose => "diagnose",
            Self::PassThrough => "pass-through",
        }
    }
}

impl fmt::Display for UnknownTokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownTokenPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diagnose" => Ok(Self::Diagnose),
            "pass-through" | "passthrough" | "pass_through" => Ok(Self::PassThrough),
            _ => Err(DomainError::UnknownTokenPolicy(s.to_string())),
        }
    }
}

/// Settings for one resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Maximum nesting of variable values that themselves contain placeholders.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of placeholders one resolution call may expand,
    /// counting nested ones.
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,

    /// Treatment of placeholders whose token is not recognized.
    #[serde(default)]
    pub unknown_tokens: UnknownTokenPolicy,
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

const fn default_max_expansions() -> usize {
    DEFAULT_MAX_EXPANSIONS
}

impl EngineSettings {
    /// Sets the maximum expansion depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the expansion budget of one resolution call.
    #[must_use]
    pub const fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Sets the unknown-token policy.
    #[must_use]
    pub const fn with_unknown_tokens(mut self, policy: UnknownTokenPolicy) -> Self {
        self.unknown_tokens = policy;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            unknown_tokens: UnknownTokenPolicy::default(),
        }
    }
}
