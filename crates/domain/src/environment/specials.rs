//! Computed special constants (`{{I:...}}`, `{{A:...}}`, `{{H:...}}`)

use serde::{Deserialize, Serialize};

use super::scope::VariableScope;

/// Namespace of a special constant, selected by the placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialNamespace {
    /// Values describing the owning instance (`I`).
    #[serde(rename = "I")]
    Instance,
    /// Values describing the owning process/application (`A`).
    #[serde(rename = "A")]
    Application,
    /// Values describing the target host (`H`).
    #[serde(rename = "H")]
    Host,
}

impl SpecialNamespace {
    /// All namespaces, in presentation order.
    pub const ALL: [Self; 3] = [Self::Instance, Self::Application, Self::Host];

    /// Returns the placeholder token of the namespace.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Instance => "I",
            Self::Application => "A",
            Self::Host => "H",
        }
    }

    /// Maps a placeholder token to its namespace.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.token() == token)
    }
}

/// Well-known keys of derived special constants.
pub mod keys {
    /// `I:ID` - instance identifier.
    pub const INSTANCE_ID: &str = "ID";
    /// `I:NAME` - instance name.
    pub const INSTANCE_NAME: &str = "NAME";
    /// `I:TAG` - deployed instance version.
    pub const INSTANCE_TAG: &str = "TAG";
    /// `I:SYSTEM` - name of the system the instance belongs to.
    pub const INSTANCE_SYSTEM: &str = "SYSTEM";
    /// `A:ID` - process identifier.
    pub const APPLICATION_ID: &str = "ID";
    /// `A:NAME` - process name.
    pub const APPLICATION_NAME: &str = "NAME";
    /// `H:HOSTNAME` - target host name.
    pub const HOSTNAME: &str = "HOSTNAME";
}

/// Owner facts from which special constants are derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerFacts<'a> {
    /// Instance identifier.
    pub instance_id: &'a str,
    /// Instance name.
    pub instance_name: &'a str,
    /// Deployed instance version, if known.
    pub instance_tag: Option<&'a str>,
    /// Name of the owning system, if any.
    pub system_name: Option<&'a str>,
    /// Owning process `(id, name)`, if the expression belongs to a process.
    pub process: Option<(&'a str, &'a str)>,
    /// Target host name, if known.
    pub hostname: Option<&'a str>,
}

/// Special constants, one scope per namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialConstants {
    /// `I` constants.
    #[serde(default)]
    pub instance: VariableScope,
    /// `A` constants.
    #[serde(default)]
    pub application: VariableScope,
    /// `H` constants.
    #[serde(default)]
    pub host: VariableScope,
}

impl SpecialConstants {
    /// Creates an empty set of constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the well-known constants for an owner.
    #[must_use]
    pub fn derive(facts: &OwnerFacts<'_>) -> Self {
        let mut instance = VariableScope::new()
            .with(keys::INSTANCE_ID, facts.instance_id)
            .with(keys::INSTANCE_NAME, facts.instance_name);
        if let Some(tag) = facts.instance_tag {
            instance = instance.with(keys::INSTANCE_TAG, tag);
        }
        if let Some(system) = facts.system_name {
            instance = instance.with(keys::INSTANCE_SYSTEM, system);
        }

        let application = match facts.process {
            Some((id, name)) => VariableScope::new()
                .with(keys::APPLICATION_ID, id)
                .with(keys::APPLICATION_NAME, name),
            None => VariableScope::new(),
        };

        let host = match facts.hostname {
            Some(hostname) => VariableScope::new().with(keys::HOSTNAME, hostname),
            None => VariableScope::new(),
        };

        Self {
            instance,
            application,
            host,
        }
    }

    /// Returns the scope of one namespace.
    #[must_use]
    pub const fn scope(&self, namespace: SpecialNamespace) -> &VariableScope {
        match namespace {
            SpecialNamespace::Instance => &self.instance,
            SpecialNamespace::Application => &self.application,
            SpecialNamespace::Host => &self.host,
        }
    }

    /// Gets one constant.
    #[must_use]
    pub fn get(&self, namespace: SpecialNamespace, key: &str) -> Option<&str> {
        self.scope(namespace).get(key)
    }

    /// Returns a copy with one constant set.
    #[must_use]
    pub fn with(mut self, namespace: SpecialNamespace, key: &str, value: &str) -> Self {
        let scope = match namespace {
            SpecialNamespace::Instance => &mut self.instance,
            SpecialNamespace::Application => &mut self.application,
            SpecialNamespace::Host => &mut self.host,
        };
        *scope = std::mem::take(scope).with(key, value);
        self
    }

    /// Iterates over all constants as `(namespace, key, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (SpecialNamespace, &str, &str)> {
        SpecialNamespace::ALL
            .into_iter()
            .flat_map(move |ns| self.scope(ns).iter().map(move |(k, v)| (ns, k, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_full() {
        let facts = OwnerFacts {
            instance_id: "inst-1",
            instance_name: "Production",
            instance_tag: Some("7"),
            system_name: Some("Plant A"),
            process: Some(("web-1", "Web Server")),
            hostname: Some("node01"),
        };
        let constants = SpecialConstants::derive(&facts);
        assert_eq!(constants.get(SpecialNamespace::Instance, "NAME"), Some("Production"));
        assert_eq!(constants.get(SpecialNamespace::Instance, "SYSTEM"), Some("Plant A"));
        assert_eq!(constants.get(SpecialNamespace::Application, "ID"), Some("web-1"));
        assert_eq!(constants.get(SpecialNamespace::Host, "HOSTNAME"), Some("node01"));
    }

    #[test]
    fn test_derive_without_process() {
        let facts = OwnerFacts {
            instance_id: "inst-1",
            instance_name: "Test",
            ..OwnerFacts::default()
        };
        let constants = SpecialConstants::derive(&facts);
        assert!(constants.application.is_empty());
        assert!(constants.host.is_empty());
        assert_eq!(constants.get(SpecialNamespace::Instance, "TAG"), None);
    }

    #[test]
    fn test_with_and_iter() {
        let constants = SpecialConstants::new()
            .with(SpecialNamespace::Host, "HOSTNAME", "h1")
            .with(SpecialNamespace::Instance, "ID", "i1");
        let all: Vec<_> = constants.iter().collect();
        assert_eq!(
            all,
            vec![
                (SpecialNamespace::Instance, "ID", "i1"),
                (SpecialNamespace::Host, "HOSTNAME", "h1"),
            ]
        );
    }

    #[test]
    fn test_namespace_tokens() {
        assert_eq!(SpecialNamespace::from_token("A"), Some(SpecialNamespace::Application));
        assert_eq!(SpecialNamespace::from_token("Z"), None);
    }
}
