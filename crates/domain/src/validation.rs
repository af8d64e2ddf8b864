//! Validation outcomes for field values
//!
//! A failed [`ValidationResult`] is the one outcome that blocks saving a
//! configuration. It names every offending placeholder.

use serde::Serialize;
use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::error::{DomainError, DomainResult};
use crate::value_type::ValueType;

/// How a raw value breaks its field's plain/link mode.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeViolation {
    /// Link mode, but no placeholder opening delimiter.
    #[error("link mode value contains no placeholder")]
    MissingPlaceholder,
    /// Link mode, but the delimiters do not pair up.
    #[error("link mode value has {opening} opening and {closing} closing delimiters")]
    UnbalancedDelimiters {
        /// Number of `{{`.
        opening: usize,
        /// Number of `}}`.
        closing: usize,
    },
    /// Plain mode, but the value contains a placeholder opening delimiter.
    #[error("plain mode value contains a placeholder delimiter")]
    UnexpectedPlaceholder,
}

/// One reason a field value cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum ValidationFailure {
    /// The resolved value does not satisfy the declared type.
    #[error("'{value}' is not a valid {expected} value")]
    TypeMismatch {
        /// The declared type.
        expected: ValueType,
        /// The resolved value.
        value: String,
    },

    /// The raw value breaks the field's mode.
    #[error("{violation}")]
    ModeMismatch {
        /// What is wrong with the raw value.
        violation: ModeViolation,
    },

    /// Placeholders remain in the resolved value.
    #[error("unresolved placeholders: {}", .placeholders.join(", "))]
    Unresolved {
        /// Raw text of each remaining placeholder.
        placeholders: Vec<String>,
    },

    /// The raw value does not parse.
    #[error("{diagnostic}")]
    Syntax {
        /// The parse diagnostic.
        diagnostic: Diagnostic,
    },
}

/// The outcome of validating one field value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Every failure found; empty when the value is valid.
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Records a failure.
    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Returns true if no failure was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable reason, `None` when valid.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Placeholders named by `Unresolved` failures.
    #[must_use]
    pub fn offending_placeholders(&self) -> Vec<&str> {
        self.failures
            .iter()
            .filter_map(|failure| match failure {
                ValidationFailure::Unresolved { placeholders } => Some(placeholders),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Converts a failing result into `DomainError::ValidationFailed`.
    ///
    /// # Errors
    ///
    /// Returns an error carrying [`Self::reason`] if any failure was found.
    pub fn into_result(self) -> DomainResult<()> {
        match self.reason() {
            None => Ok(()),
            Some(reason) => Err(DomainError::ValidationFailed(reason)),
        }
    }
}
