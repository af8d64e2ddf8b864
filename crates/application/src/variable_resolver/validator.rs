//! Type and mode validation of field values
//!
//! Validation is the only step that turns diagnostics into a blocking
//! outcome.

use linkexpr_domain::expression::{FieldValue, OPENING_DELIMITER, ResolvedValue};
use linkexpr_domain::{ModeViolation, PORT_RANGE, ValidationFailure, ValidationResult, ValueType};

use super::parser::delimiter_counts;

/// Validates a resolved value against its field's declared type and mode.
///
/// `raw` is the stored value before resolution and is checked against
/// `link_mode`. The type is only checked once nothing is left unresolved.
#[must_use]
pub fn validate(
    resolved: &ResolvedValue,
    declared: ValueType,
    link_mode: bool,
    raw: &str,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let mode = validate_mode(raw, link_mode);
    let unbalanced = matches!(mode, Some(ModeViolation::UnbalancedDelimiters { .. }));
    if let Some(violation) = mode {
        result.push(ValidationFailure::ModeMismatch { violation });
    }

    if !unbalanced
        && let Some(diagnostic) = resolved.diagnostics.iter().find(|d| d.is_syntax())
    {
        result.push(ValidationFailure::Syntax {
            diagnostic: diagnostic.clone(),
        });
    }

    let placeholders = resolved.unresolved_placeholders();
    if !placeholders.is_empty() {
        result.push(ValidationFailure::Unresolved {
            placeholders: placeholders.into_iter().map(str::to_string).collect(),
        });
    }

    if resolved.is_complete()
        && let Err(failure) = validate_type(&resolved.value, declared)
    {
        result.push(failure);
    }

    result
}

/// Validates a field given its resolved value.
#[must_use]
pub fn validate_field(field: &FieldValue, resolved: &ResolvedValue) -> ValidationResult {
    validate(resolved, field.value_type, field.link_mode, &field.raw)
}

/// Checks the raw value against the field mode.
///
/// Link mode requires an opening delimiter and balanced delimiter counts.
/// Plain mode forbids the opening delimiter.
#[must_use]
pub fn validate_mode(raw: &str, link_mode: bool) -> Option<ModeViolation> {
    let (opening, closing) = delimiter_counts(raw);
    if link_mode {
        if !raw.contains(OPENING_DELIMITER) {
            Some(ModeViolation::MissingPlaceholder)
        } else if opening == closing {
            None
        } else {
            Some(ModeViolation::UnbalancedDelimiters { opening, closing })
        }
    } else if opening > 0 {
        Some(ModeViolation::UnexpectedPlaceholder)
    } else {
        None
    }
}

/// Checks a fully resolved value against a declared type.
///
/// # Errors
///
/// Returns [`ValidationFailure::TypeMismatch`] if the value does not
/// satisfy the type.
pub fn validate_type(value: &str, declared: ValueType) -> Result<(), ValidationFailure> {
    let accepted = match declared {
        ValueType::String => true,
        ValueType::Boolean => {
            value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
        }
        ValueType::Numeric => value.parse::<i64>().is_ok(),
        ValueType::Port => value
            .parse::<i64>()
            .is_ok_and(|port| PORT_RANGE.contains(&port)),
    };

    if accepted {
        Ok(())
    } else {
        Err(ValidationFailure::TypeMismatch {
            expected: declared,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use linkexpr_domain::Diagnostic;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_boolean() {
        assert!(validate_type("true", ValueType::Boolean).is_ok());
        assert!(validate_type("FALSE", ValueType::Boolean).is_ok());
        assert_eq!(
            validate_type("yes", ValueType::Boolean).unwrap_err(),
            ValidationFailure::TypeMismatch {
                expected: ValueType::Boolean,
                value: "yes".to_string(),
            }
        );
    }

    #[test]
    fn test_numeric() {
        assert!(validate_type("-42", ValueType::Numeric).is_ok());
        assert!(validate_type("+7", ValueType::Numeric).is_ok());
        assert!(validate_type("4.2", ValueType::Numeric).is_err());
        assert!(validate_type("", ValueType::Numeric).is_err());
        assert!(validate_type(" 1", ValueType::Numeric).is_err());
    }

    #[test]
    fn test_port() {
        assert!(validate_type("8080", ValueType::Port).is_ok());
        assert!(validate_type("65535", ValueType::Port).is_ok());
        assert!(validate_type("0", ValueType::Port).is_err());
        assert!(validate_type("65536", ValueType::Port).is_err());
        assert!(validate_type("http", ValueType::Port).is_err());
    }

    #[test]
    fn test_string_accepts_anything() {
        assert!(validate_type("", ValueType::String).is_ok());
        assert!(validate_type("{{anything", ValueType::String).is_ok());
    }

    #[test]
    fn test_mode() {
        assert_eq!(validate_mode("{{X:a}}", true), None);
        assert_eq!(validate_mode("literal", true), Some(ModeViolation::MissingPlaceholder));
        assert_eq!(
            validate_mode("{{X:a}} {{X:b", true),
            Some(ModeViolation::UnbalancedDelimiters {
                opening: 2,
                closing: 1
            })
        );
        assert_eq!(validate_mode("literal", false), None);
        assert_eq!(
            validate_mode("{{X:a}}", false),
            Some(ModeViolation::UnexpectedPlaceholder)
        );
    }

    #[test]
    fn test_validate_success() {
        let result = validate(&ResolvedValue::new("true"), ValueType::Boolean, true, "{{X:secure}}");
        assert!(result.is_valid());
    }

    #[test]
    fn test_unresolved_skips_type_check() {
        let resolved = ResolvedValue::new("{{X:missing}}")
            .with_diagnostic(Diagnostic::unresolved("{{X:missing}}"));
        let result = validate(&resolved, ValueType::Port, true, "{{X:missing}}");
        assert_eq!(
            result.failures,
            vec![ValidationFailure::Unresolved {
                placeholders: vec!["{{X:missing}}".to_string()],
            }]
        );
        assert_eq!(result.offending_placeholders(), vec!["{{X:missing}}"]);
    }

    #[test]
    fn test_unbalanced_reported_once() {
        let raw = "{{X:port";
        let resolved = ResolvedValue::new(raw).with_diagnostic(Diagnostic::UnbalancedDelimiters {
            opening: 1,
            closing: 0,
        });
        let result = validate(&resolved, ValueType::String, true, raw);
        assert_eq!(
            result.failures,
            vec![ValidationFailure::ModeMismatch {
                violation: ModeViolation::UnbalancedDelimiters {
                    opening: 1,
                    closing: 0
                }
            }]
        );
    }

    #[test]
    fn test_misordered_delimiters_are_a_syntax_failure() {
        let raw = "}}{{";
        let diagnostic = Diagnostic::UnbalancedDelimiters {
            opening: 1,
            closing: 1,
        };
        let resolved = ResolvedValue::new(raw).with_diagnostic(diagnostic.clone());
        let result = validate(&resolved, ValueType::String, true, raw);
        assert_eq!(result.failures, vec![ValidationFailure::Syntax { diagnostic }]);
    }

    #[test]
    fn test_validate_field() {
        let field = FieldValue::plain("9000").with_type(ValueType::Port);
        assert!(validate_field(&field, &ResolvedValue::new("9000")).is_valid());
    }
}
