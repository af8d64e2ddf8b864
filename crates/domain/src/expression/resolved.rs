//! Result of resolving an expression

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;

/// A best-effort resolved string and the problems found producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedValue {
    /// The rendered string. Unresolved placeholders remain verbatim.
    pub value: String,
    /// Problems found, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedValue {
    /// Creates a value without diagnostics.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Attaches a diagnostic.
    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Returns true if nothing was left unresolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns true if the source failed to parse.
    #[must_use]
    pub fn has_syntax_error(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_syntax)
    }

    /// Raw text of each placeholder left in the value, without duplicates.
    #[must_use]
    pub fn unresolved_placeholders(&self) -> Vec<&str> {
        let mut placeholders: Vec<&str> = Vec::new();
        for placeholder in self.diagnostics.iter().filter_map(Diagnostic::placeholder) {
            if !placeholders.contains(&placeholder) {
                placeholders.push(placeholder);
            }
        }
        placeholders
    }
}
