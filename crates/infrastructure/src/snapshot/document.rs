//! Snapshot document types
//!
//! A snapshot lists systems and instances with their processes. Scalar
//! values may be written as strings, numbers or booleans; they are kept as
//! the text the engine substitutes.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use linkexpr_domain::environment::{ProcessScope, VariableScope};

/// A configuration value as written in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Text.
    Text(String),
    /// Integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Ordered key/value map of a snapshot.
pub type ScalarMap = IndexMap<String, ScalarValue>;

pub(crate) fn to_scope(map: &ScalarMap) -> VariableScope {
    map.iter()
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect()
}

/// Root document of a configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    /// Systems grouping instances.
    #[serde(default)]
    pub systems: Vec<SystemDocument>,

    /// Deployed instances.
    #[serde(default)]
    pub instances: Vec<InstanceDocument>,

    /// Values available through the `ENV` token.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub environment: ScalarMap,
}

/// A system and its variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDocument {
    /// System identifier.
    pub id: String,

    /// Display name; defaults to the id.
    #[serde(default)]
    pub name: Option<String>,

    /// Custom system variables.
    #[serde(default)]
    pub variables: ScalarMap,
}

/// An instance, its variables and its processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDocument {
    /// Instance identifier.
    pub id: String,

    /// Display name; defaults to the id.
    #[serde(default)]
    pub name: Option<String>,

    /// Deployed version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ScalarValue>,

    /// Directory the instance is deployed below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_root: Option<String>,

    /// Host the instance runs on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Identifier of the owning system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Custom instance variables.
    #[serde(default)]
    pub variables: ScalarMap,

    /// Processes in configuration order.
    #[serde(default)]
    pub processes: Vec<ProcessDocument>,
}

/// A process and its custom parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDocument {
    /// Process identifier.
    pub id: String,

    /// Display name; defaults to the id.
    #[serde(default)]
    pub name: Option<String>,

    /// Custom process parameters.
    #[serde(default)]
    pub parameters: ScalarMap,
}

impl SystemDocument {
    /// Display name, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl InstanceDocument {
    /// Display name, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl ProcessDocument {
    /// Converts to the process scope used by the engine.
    #[must_use]
    pub fn to_scope(&self) -> ProcessScope {
        ProcessScope::new(
            &self.id,
            self.name.as_deref().unwrap_or(&self.id),
            to_scope(&self.parameters),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::serialization::from_yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalars_become_text() {
        let doc: InstanceDocument = from_yaml(
            "id: i1\ntag: 3\nvariables:\n  port: 8080\n  secure: true\n  ratio: 0.5\n  name: web\n",
        )
        .unwrap();
        let scope = to_scope(&doc.variables);
        assert_eq!(scope.get("port"), Some("8080"));
        assert_eq!(scope.get("secure"), Some("true"));
        assert_eq!(scope.get("ratio"), Some("0.5"));
        assert_eq!(scope.get("name"), Some("web"));
        assert_eq!(doc.tag.as_ref().unwrap().to_string(), "3");
        assert_eq!(doc.display_name(), "i1");
    }

    #[test]
    fn test_process_name_defaults_to_id() {
        let doc = ProcessDocument {
            id: "web".to_string(),
            name: None,
            parameters: ScalarMap::new(),
        };
        assert_eq!(doc.to_scope().name, "web");
    }
}
