//! Variable scope types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An immutable, insertion-ordered map of variable keys to raw values.
///
/// Values are stored exactly as configured and may themselves contain
/// placeholders. Keys are unique; building a scope from pairs with a repeated
/// key keeps the first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableScope {
    entries: IndexMap<String, String>,
}

impl VariableScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this scope with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Gets the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the key is defined in this scope.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the scope has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableScope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<String, String>> for VariableScope {
    fn from(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }
}

/// Defines the origin of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Custom parameters of a process.
    Process,
    /// Custom variables of an instance.
    Instance,
    /// Custom variables of the system an instance belongs to.
    System,
    /// Well-known deployment path constants.
    Path,
    /// Computed special constants.
    Special,
    /// Environment values supplied by the caller.
    Environment,
}

impl ScopeKind {
    /// Precedence for variable (`X`) lookups; higher wins.
    /// Returns `None` for scopes that never take part in that lookup.
    #[must_use]
    pub const fn variable_precedence(self) -> Option<u8> {
        match self {
            Self::Process => Some(0),
            Self::Instance => Some(1),
            Self::System => Some(2),
            Self::Path | Self::Special | Self::Environment => None,
        }
    }

    /// Returns a human-readable name for the scope.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Process => "Process",
            Self::Instance => "Instance",
            Self::System => "System",
            Self::Path => "Path",
            Self::Special => "Special",
            Self::Environment => "Environment",
        }
    }
}

/// State of one stored entry with respect to higher-precedence scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScopeEntry {
    /// The entry is the value a lookup returns.
    Active {
        /// The stored value.
        value: String,
    },
    /// The entry is retained but overridden by a scope of higher precedence.
    Shadowed {
        /// The stored value.
        value: String,
        /// The scope whose entry wins.
        by: ScopeKind,
    },
}

impl ScopeEntry {
    /// Returns the stored value regardless of state.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Active { value } | Self::Shadowed { value, .. } => value,
        }
    }

    /// Returns true if the entry is overridden.
    #[must_use]
    pub const fn is_shadowed(&self) -> bool {
        matches!(self, Self::Shadowed { .. })
    }

    /// Returns the scope that overrides this entry, if any.
    #[must_use]
    pub const fn shadowed_by(&self) -> Option<ScopeKind> {
        match self {
            Self::Active { .. } => None,
            Self::Shadowed { by, .. } => Some(*by),
        }
    }
}

/// A value found by a lookup, with its origin scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// The looked-up key.
    pub key: String,
    /// The raw value, possibly containing further placeholders.
    pub value: String,
    /// The scope from which this value was taken.
    pub scope: ScopeKind,
    /// Id of the process owning the value, for process-scoped values.
    pub process: Option<String>,
}

impl ResolvedVariable {
    /// Creates a new resolved variable without a process owner.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>, scope: ScopeKind) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            scope,
            process: None,
        }
    }

    /// Attaches the owning process id.
    #[must_use]
    pub fn owned_by(mut self, process_id: impl Into<String>) -> Self {
        self.process = Some(process_id.into());
        self
    }
}
