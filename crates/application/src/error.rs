//! Application error types

use linkexpr_domain::{Diagnostic, DomainError};
use thiserror::Error;

use crate::ports::RegistryError;

/// A raw value whose delimiters do not pair up.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// The numbers of opening and closing delimiters differ.
    #[error("unbalanced delimiters: {opening} opening and {closing} closing")]
    UnbalancedDelimiters {
        /// Number of `{{`.
        opening: usize,
        /// Number of `}}`.
        closing: usize,
    },

    /// An opening delimiter has no closing delimiter after it.
    #[error("placeholder opened at byte {offset} is never closed")]
    UnclosedPlaceholder {
        /// Byte offset of the opening delimiter.
        offset: usize,
        /// Number of `{{`.
        opening: usize,
        /// Number of `}}`.
        closing: usize,
    },
}

impl SyntaxError {
    /// The diagnostic reported for this error.
    #[must_use]
    pub const fn to_diagnostic(self) -> Diagnostic {
        match self {
            Self::UnbalancedDelimiters { opening, closing }
            | Self::UnclosedPlaceholder {
                opening, closing, ..
            } => Diagnostic::UnbalancedDelimiters { opening, closing },
        }
    }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A raw value failed to parse.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The requested instance or process was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The configuration registry could not be read.
    #[error("registry error: {0}")]
    Registry(String),
}

impl From<RegistryError> for ApplicationError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NotFound(what) => Self::NotFound(what),
            RegistryError::Unavailable(_) => Self::Registry(error.to_string()),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_syntax_error_maps_to_diagnostic() {
        let err = SyntaxError::UnclosedPlaceholder {
            offset: 3,
            opening: 1,
            closing: 1,
        };
        assert_eq!(
            err.to_diagnostic(),
            Diagnostic::UnbalancedDelimiters {
                opening: 1,
                closing: 1
            }
        );
        assert_eq!(err.to_string(), "placeholder opened at byte 3 is never closed");
    }
}
