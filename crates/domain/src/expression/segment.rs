//! Parsed expression segments
//!
//! An [`Expression`] keeps every byte of its source: literal text and the raw
//! text of each placeholder, so `expression.to_string()` reproduces the input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::token::TokenKind;

/// Opens a placeholder.
pub const OPENING_DELIMITER: &str = "{{";
/// Closes a placeholder.
pub const CLOSING_DELIMITER: &str = "}}";
/// Separates token and key inside a placeholder.
pub const SEPARATOR: char = ':';

/// One `{{TOKEN:KEY}}` unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placeholder {
    /// Text before the first separator.
    pub token: String,
    /// Classification of `token`.
    pub kind: TokenKind,
    /// Text after the first separator; empty if there is none.
    pub key: String,
    /// Source text including delimiters.
    pub raw: String,
}

impl Placeholder {
    /// Builds a placeholder from a token and key.
    #[must_use]
    pub fn new(token: impl Into<String>, key: impl Into<String>) -> Self {
        let token = token.into();
        let key = key.into();
        let raw = format!("{OPENING_DELIMITER}{token}{SEPARATOR}{key}{CLOSING_DELIMITER}");
        Self {
            kind: TokenKind::from_token(&token),
            token,
            key,
            raw,
        }
    }

    /// Builds a placeholder from the text between its delimiters.
    #[must_use]
    pub fn from_inner(inner: &str) -> Self {
        let (token, key) = inner.split_once(SEPARATOR).unwrap_or((inner, ""));
        Self {
            token: token.to_string(),
            kind: TokenKind::from_token(token),
            key: key.to_string(),
            raw: format!("{OPENING_DELIMITER}{inner}{CLOSING_DELIMITER}"),
        }
    }

    /// Splits a parameter key into `(process, parameter)`.
    ///
    /// `proc:param` yields `(Some("proc"), "param")`, `param` yields
    /// `(None, "param")`.
    #[must_use]
    pub fn qualified_key(&self) -> (Option<&str>, &str) {
        match self.key.split_once(SEPARATOR) {
            Some((qualifier, key)) => (Some(qualifier), key),
            None => (None, &self.key),
        }
    }

    /// `TOKEN:KEY` without delimiters.
    #[must_use]
    pub fn label(&self) -> &str {
        self.raw
            .strip_prefix(OPENING_DELIMITER)
            .and_then(|s| s.strip_suffix(CLOSING_DELIMITER))
            .unwrap_or(&self.raw)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A piece of a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// Text outside any placeholder.
    Literal(String),
    /// A placeholder.
    Placeholder(Placeholder),
}

impl Segment {
    /// Source text of the segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Placeholder(placeholder) => &placeholder.raw,
        }
    }

    /// Returns the placeholder, if this is one.
    #[must_use]
    pub const fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Literal(_) => None,
            Self::Placeholder(placeholder) => Some(placeholder),
        }
    }
}

/// An ordered sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    segments: Vec<Segment>,
}

impl Expression {
    /// Creates an expression from segments.
    #[must_use]
    pub const fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Creates an expression holding one literal.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self::new(vec![Segment::Literal(text)])
    }

    /// Returns the segments in source order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the expression, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Iterates over placeholders in source order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(Segment::as_placeholder)
    }

    /// Returns true if any segment is a placeholder.
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Returns true if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.segments
            .iter()
            .try_for_each(|segment| f.write_str(segment.as_str()))
    }
}

impl From<Vec<Segment>> for Expression {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}
