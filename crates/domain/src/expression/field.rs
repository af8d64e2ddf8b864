//! Configuration field values

use serde::{Deserialize, Serialize};

use crate::value_type::ValueType;

/// The raw value of one configurable field.
///
/// `link_mode` is stored on the field and never inferred from `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The value exactly as stored.
    pub raw: String,
    /// Whether `raw` is an expression to be resolved.
    #[serde(default)]
    pub link_mode: bool,
    /// The type the resolved value must satisfy.
    #[serde(default)]
    pub value_type: ValueType,
}

impl FieldValue {
    /// A plain-mode string field.
    #[must_use]
    pub fn plain(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            link_mode: false,
            value_type: ValueType::String,
        }
    }

    /// A link-mode string field.
    #[must_use]
    pub fn link(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            link_mode: true,
            value_type: ValueType::String,
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub const fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_defaults() {
        let field: FieldValue = serde_json::from_str(r#"{"raw": "8080"}"#).unwrap();
        assert_eq!(field, FieldValue::plain("8080"));
    }

    #[test]
    fn test_builders() {
        let field = FieldValue::link("{{X:port}}").with_type(ValueType::Port);
        assert!(field.link_mode);
        assert_eq!(field.value_type, ValueType::Port);
    }
}
