//! Diagnostics reported while parsing and resolving expressions
//!
//! Diagnostics are additive: a render always produces a value and collects
//! these alongside it. Only validation turns them into a failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem found in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Delimiters do not pair up; nothing was resolved.
    #[error("unbalanced delimiters: {opening} opening and {closing} closing")]
    UnbalancedDelimiters {
        /// Number of `{{` in the source.
        opening: usize,
        /// Number of `}}` in the source.
        closing: usize,
    },

    /// No applicable scope defines the key.
    #[error("unresolved reference {placeholder}")]
    UnresolvedReference {
        /// Raw placeholder text.
        placeholder: String,
    },

    /// The token is not in the recognized set.
    #[error("unknown token '{token}' in {placeholder}")]
    UnknownToken {
        /// Raw placeholder text.
        placeholder: String,
        /// The unrecognized token.
        token: String,
    },

    /// Expansion was cut off by a cycle or the depth bound.
    #[error("expansion of {placeholder} exceeds depth {limit}")]
    DepthExceeded {
        /// Raw placeholder text.
        placeholder: String,
        /// The configured bound.
        limit: usize,
    },

    /// The call ran out of its expansion budget before reaching this placeholder.
    #[error("expansion budget of {limit} placeholders exhausted at {placeholder}")]
    ExpansionLimit {
        /// Raw placeholder text.
        placeholder: String,
        /// The configured budget.
        limit: usize,
    },
}

impl Diagnostic {
    /// Creates an unresolved-reference diagnostic.
    #[must_use]
    pub fn unresolved(placeholder: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            placeholder: placeholder.into(),
        }
    }

    /// Raw text of the placeholder left in the output, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::UnbalancedDelimiters { .. } => None,
            Self::UnresolvedReference { placeholder }
            | Self::UnknownToken { placeholder, .. }
            | Self::DepthExceeded { placeholder, .. }
            | Self::ExpansionLimit { placeholder, .. } => Some(placeholder),
        }
    }

    /// Returns true for syntax errors.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::UnbalancedDelimiters { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        assert_eq!(
            Diagnostic::unresolved("{{X:missing}}").to_string(),
            "unresolved reference {{X:missing}}"
        );
        let depth = Diagnostic::DepthExceeded {
            placeholder: "{{X:a}}".to_string(),
            limit: 10,
        };
        assert_eq!(depth.to_string(), "expansion of {{X:a}} exceeds depth 10");
    }

    #[test]
    fn test_placeholder() {
        let syntax = Diagnostic::UnbalancedDelimiters {
            opening: 1,
            closing: 0,
        };
        assert!(syntax.is_syntax());
        assert_eq!(syntax.placeholder(), None);
        let unknown = Diagnostic::UnknownToken {
            placeholder: "{{Q:a}}".to_string(),
            token: "Q".to_string(),
        };
        assert_eq!(unknown.placeholder(), Some("{{Q:a}}"));
    }

    #[test]
    fn test_serialized_kind() {
        let json = serde_json::to_value(Diagnostic::unresolved("{{X:k}}")).unwrap();
        assert_eq!(json["kind"], "unresolved_reference");
        assert_eq!(json["placeholder"], "{{X:k}}");
    }
}
