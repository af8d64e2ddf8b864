//! Parser for `{{TOKEN:KEY}}` syntax
//!
//! Splits a raw field value into literal and placeholder segments. Placeholders
//! do not nest: the first closing delimiter after an opening one closes it.

use linkexpr_domain::expression::{
    CLOSING_DELIMITER, Expression, OPENING_DELIMITER, Placeholder, Segment,
};

use crate::error::SyntaxError;

/// Counts opening and closing delimiters.
///
/// ```
/// use linkexpr_application::variable_resolver::parser::delimiter_counts;
///
/// assert_eq!(delimiter_counts("{{X:a}} and {{X:b"), (2, 1));
/// ```
#[must_use]
pub fn delimiter_counts(raw: &str) -> (usize, usize) {
    (
        raw.matches(OPENING_DELIMITER).count(),
        raw.matches(CLOSING_DELIMITER).count(),
    )
}

/// Parses a raw value into an expression.
///
/// Tokens outside the recognized set are kept as placeholders of kind
/// `TokenKind::Unknown`.
///
/// # Errors
///
/// Returns [`SyntaxError::UnbalancedDelimiters`] if the delimiter counts
/// differ, and [`SyntaxError::UnclosedPlaceholder`] if an opening delimiter
/// has no closing delimiter after it. No partial result is produced.
///
/// # Examples
///
/// ```
/// use linkexpr_application::variable_resolver::parser::parse;
///
/// let expr = parse("--port={{X:api.port}}").unwrap();
/// assert_eq!(expr.segments().len(), 2);
/// assert_eq!(expr.to_string(), "--port={{X:api.port}}");
/// ```
pub fn parse(raw: &str) -> Result<Expression, SyntaxError> {
    let (opening, closing) = delimiter_counts(raw);
    if opening != closing {
        return Err(SyntaxError::UnbalancedDelimiters { opening, closing });
    }

    let mut segments = Vec::new();
    let mut rest = raw;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPENING_DELIMITER) {
        let after_open = start + OPENING_DELIMITER.len();
        let Some(len) = rest[after_open..].find(CLOSING_DELIMITER) else {
            return Err(SyntaxError::UnclosedPlaceholder {
                offset: consumed + start,
                opening,
                closing,
            });
        };

        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }
        let inner = &rest[after_open..after_open + len];
        segments.push(Segment::Placeholder(Placeholder::from_inner(inner)));

        let end = after_open + len + CLOSING_DELIMITER.len();
        consumed += end;
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(Expression::new(segments))
}

/// Returns true if the input looks like it contains placeholders.
#[must_use]
pub fn has_placeholders(raw: &str) -> bool {
    raw.contains(OPENING_DELIMITER) && raw.contains(CLOSING_DELIMITER)
}

/// Extracts the placeholders of a raw value. Returns nothing if the value
/// does not parse.
#[must_use]
pub fn extract_placeholders(raw: &str) -> Vec<Placeholder> {
    parse(raw)
        .map(|expr| expr.placeholders().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use linkexpr_domain::{OperatingSystem, SpecialNamespace, TokenKind};
    use pretty_assertions::assert_eq;

    fn placeholder(segment: &Segment) -> &Placeholder {
        match segment {
            Segment::Placeholder(p) => p,
            Segment::Literal(text) => panic!("expected placeholder, got literal {text:?}"),
        }
    }

    #[test]
    fn test_parse_simple_placeholder() {
        let expr = parse("{{X:test.api.port}}").unwrap();
        assert_eq!(expr.segments().len(), 1);
        let p = placeholder(&expr.segments()[0]);
        assert_eq!(p.token, "X");
        assert_eq!(p.key, "test.api.port");
        assert_eq!(p.kind, TokenKind::Variable);
    }

    #[test]
    fn test_parse_literals_and_placeholders() {
        let expr = parse("http://{{H:HOSTNAME}}:{{V:port}}/api").unwrap();
        let kinds: Vec<_> = expr
            .segments()
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => format!("L({text})"),
                Segment::Placeholder(p) => format!("P({})", p.label()),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["L(http://)", "P(H:HOSTNAME)", "L(:)", "P(V:port)", "L(/api)"]
        );
        assert_eq!(
            placeholder(&expr.segments()[1]).kind,
            TokenKind::Special(SpecialNamespace::Host)
        );
    }

    #[test]
    fn test_parse_os_selectors() {
        let expr =
            parse("{{WINDOWS:launch.bat}}{{LINUX:launch.sh}}{{LINUX_AARCH64:launch.sh}}-x")
                .unwrap();
        let selectors: Vec<_> = expr.placeholders().map(|p| p.kind).collect();
        assert_eq!(
            selectors,
            vec![
                TokenKind::OsSelector(OperatingSystem::Windows),
                TokenKind::OsSelector(OperatingSystem::Linux),
                TokenKind::OsSelector(OperatingSystem::LinuxAarch64),
            ]
        );
    }

    #[test]
    fn test_split_on_first_separator() {
        let expr = parse("{{WINDOWS:C:\\app\\run.bat}}").unwrap();
        let p = placeholder(&expr.segments()[0]);
        assert_eq!(p.token, "WINDOWS");
        assert_eq!(p.key, "C:\\app\\run.bat");
    }

    #[test]
    fn test_unknown_token_is_kept() {
        let expr = parse("a{{Q:thing}}b").unwrap();
        assert_eq!(placeholder(&expr.segments()[1]).kind, TokenKind::Unknown);
        assert_eq!(expr.to_string(), "a{{Q:thing}}b");
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "",
            "plain text",
            "{{X:a}}{{X:b}}",
            "-Dkey={{X:k}} -Dother={{V:proc:p}} {{}}",
            "{{LINUX}} trailing",
        ];
        for input in inputs {
            assert_eq!(parse(input).unwrap().to_string(), input);
        }
    }

    #[test]
    fn test_unbalanced_opening() {
        assert_eq!(
            parse("{{X:port").unwrap_err(),
            SyntaxError::UnbalancedDelimiters {
                opening: 1,
                closing: 0
            }
        );
    }

    #[test]
    fn test_unbalanced_closing() {
        assert_eq!(
            parse("X:port}} and {{X:a}}").unwrap_err(),
            SyntaxError::UnbalancedDelimiters {
                opening: 1,
                closing: 2
            }
        );
    }

    #[test]
    fn test_misordered_delimiters() {
        assert_eq!(
            parse("{{X:a}} }}{{").unwrap_err(),
            SyntaxError::UnclosedPlaceholder {
                offset: 10,
                opening: 2,
                closing: 2
            }
        );
    }

    #[test]
    fn test_no_nesting() {
        let expr = parse("{{X:{{a}}}}").unwrap();
        let p = placeholder(&expr.segments()[0]);
        assert_eq!(p.key, "{{a");
        assert_eq!(expr.segments()[1], Segment::Literal("}}".to_string()));
    }

    #[test]
    fn test_helpers() {
        assert!(has_placeholders("a {{X:b}}"));
        assert!(!has_placeholders("a {{ b"));
        let names: Vec<_> = extract_placeholders("{{X:a}}-{{P:BIN}}")
            .into_iter()
            .map(|p| p.key)
            .collect();
        assert_eq!(names, vec!["a", "BIN"]);
        assert!(extract_placeholders("{{X:a").is_empty());
    }
}
