//! Declared value types of configuration fields

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Valid TCP/UDP port numbers.
pub const PORT_RANGE: RangeInclusive<i64> = 1..=65535;

/// The type a field's resolved value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Any text.
    #[default]
    String,
    /// `true` or `false`, case-insensitive.
    Boolean,
    /// A base-10 integer.
    Numeric,
    /// An integer within [`PORT_RANGE`].
    Port,
}

impl ValueType {
    /// Returns the configuration name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Port => "port",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "boolean" | "bool" => Ok(Self::Boolean),
            "numeric" | "number" | "integer" => Ok(Self::Numeric),
            "port" => Ok(Self::Port),
            _ => Err(DomainError::UnknownValueType(s.to_string())),
        }
    }
}
