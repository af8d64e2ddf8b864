//! Placeholder token kinds

use serde::{Deserialize, Serialize};

use crate::environment::SpecialNamespace;
use crate::os::OperatingSystem;

/// Token of a variable reference searched across scopes.
pub const VARIABLE_TOKEN: &str = "X";
/// Token of a process-parameter reference.
pub const PARAMETER_TOKEN: &str = "V";
/// Token of a deployment path constant.
pub const PATH_TOKEN: &str = "P";
/// Token of a caller-supplied environment value.
pub const ENVIRONMENT_TOKEN: &str = "ENV";

/// What a placeholder refers to, decided by its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `X`: searched in system, instance and process scopes.
    Variable,
    /// `V`: a process parameter, optionally qualified by the owning process.
    Parameter,
    /// `P`: a deployment path constant.
    Path,
    /// `I`, `A`, `H`: a computed special constant.
    Special(SpecialNamespace),
    /// `ENV`: an environment value.
    Environment,
    /// An OS selector; the key is the literal payload.
    OsSelector(OperatingSystem),
    /// A token outside the recognized set.
    Unknown,
}

impl TokenKind {
    /// Classifies a token. Tokens are case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            VARIABLE_TOKEN => Self::Variable,
            PARAMETER_TOKEN => Self::Parameter,
            PATH_TOKEN => Self::Path,
            ENVIRONMENT_TOKEN => Self::Environment,
            other => SpecialNamespace::from_token(other)
                .map(Self::Special)
                .or_else(|| OperatingSystem::from_selector_token(other).map(Self::OsSelector))
                .unwrap_or(Self::Unknown),
        }
    }

    /// Returns true for OS selectors, which never consult a scope.
    #[must_use]
    pub const fn is_os_selector(self) -> bool {
        matches!(self, Self::OsSelector(_))
    }

    /// Returns true for kinds resolved by a scope lookup.
    #[must_use]
    pub const fn is_lookup(self) -> bool {
        !matches!(self, Self::OsSelector(_) | Self::Unknown)
    }
}
