//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The operating system name is not one of the supported families.
    #[error("unknown operating system: {0}")]
    UnknownOperatingSystem(String),

    /// The declared value type is not recognized.
    #[error("unknown value type: {0}")]
    UnknownValueType(String),

    /// The unknown-token policy name is not recognized.
    #[error("unknown token policy: {0}")]
    UnknownTokenPolicy(String),

    /// A field value failed validation and must not be saved.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
