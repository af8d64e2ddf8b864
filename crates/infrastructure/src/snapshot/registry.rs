//! Snapshot-backed scope registry

use linkexpr_application::ports::{InstanceRecord, RegistryError, ScopeRegistry, SystemRecord};
use linkexpr_domain::environment::VariableScope;

use super::document::{ConfigurationSnapshot, to_scope};

/// Serves scopes from an in-memory configuration snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRegistry {
    snapshot: ConfigurationSnapshot,
    environment: VariableScope,
}

impl SnapshotRegistry {
    /// Creates a registry over a snapshot.
    #[must_use]
    pub fn new(snapshot: ConfigurationSnapshot) -> Self {
        Self {
            snapshot,
            environment: VariableScope::new(),
        }
    }

    /// Adds caller-supplied environment values. They take precedence over
    /// the snapshot's `environment` entries with the same key.
    #[must_use]
    pub fn with_environment(mut self, environment: VariableScope) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the underlying snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &ConfigurationSnapshot {
        &self.snapshot
    }
}

impl ScopeRegistry for SnapshotRegistry {
    fn instance(&self, instance_id: &str) -> Result<InstanceRecord, RegistryError> {
        let doc = self
            .snapshot
            .instances
            .iter()
            .find(|i| i.id == instance_id)
            .ok_or_else(|| RegistryError::NotFound(format!("instance '{instance_id}'")))?;

        Ok(InstanceRecord {
            id: doc.id.clone(),
            name: doc.display_name().to_string(),
            tag: doc.tag.as_ref().map(ToString::to_string),
            deployment_root: doc.deployment_root.clone(),
            hostname: doc.hostname.clone(),
            system_id: doc.system.clone(),
            variables: to_scope(&doc.variables),
            processes: doc.processes.iter().map(|p| p.to_scope()).collect(),
        })
    }

    fn system(&self, system_id: &str) -> Result<SystemRecord, RegistryError> {
        let doc = self
            .snapshot
            .systems
            .iter()
            .find(|s| s.id == system_id)
            .ok_or_else(|| RegistryError::NotFound(format!("system '{system_id}'")))?;

        Ok(SystemRecord {
            id: doc.id.clone(),
            name: doc.display_name().to_string(),
            variables: to_scope(&doc.variables),
        })
    }

    fn environment(&self) -> VariableScope {
        let snapshot = to_scope(&self.snapshot.environment);
        self.environment
            .iter()
            .fold(snapshot, |scope, (key, value)| scope.with(key, value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::snapshot::document::{InstanceDocument, ProcessDocument, ScalarMap, ScalarValue, SystemDocument};
    use pretty_assertions::assert_eq;

    fn snapshot() -> ConfigurationSnapshot {
        let mut variables = ScalarMap::new();
        variables.insert("custom.var".to_string(), ScalarValue::Text("instance".to_string()));
        let mut environment = ScalarMap::new();
        environment.insert("HOME".to_string(), ScalarValue::Text("/root".to_string()));
        environment.insert("LANG".to_string(), ScalarValue::Text("C".to_string()));

        ConfigurationSnapshot {
            systems: vec![SystemDocument {
                id: "sys".to_string(),
                name: Some("Plant A".to_string()),
                variables: ScalarMap::new(),
            }],
            instances: vec![InstanceDocument {
                id: "inst-1".to_string(),
                name: None,
                tag: Some(ScalarValue::Integer(2)),
                deployment_root: None,
                hostname: None,
                system: Some("sys".to_string()),
                variables,
                processes: vec![ProcessDocument {
                    id: "web".to_string(),
                    name: Some("Web".to_string()),
                    parameters: ScalarMap::new(),
                }],
            }],
            environment,
        }
    }

    #[test]
    fn test_instance_record() {
        let registry = SnapshotRegistry::new(snapshot());
        let record = registry.instance("inst-1").unwrap();
        assert_eq!(record.name, "inst-1");
        assert_eq!(record.tag.as_deref(), Some("2"));
        assert_eq!(record.system_id.as_deref(), Some("sys"));
        assert_eq!(record.variables.get("custom.var"), Some("instance"));
        assert_eq!(record.processes[0].name, "Web");
    }

    #[test]
    fn test_not_found() {
        let registry = SnapshotRegistry::new(snapshot());
        assert!(matches!(registry.instance("x"), Err(RegistryError::NotFound(_))));
        assert!(matches!(registry.system("x"), Err(RegistryError::NotFound(_))));
        assert_eq!(registry.system("sys").unwrap().name, "Plant A");
    }

    #[test]
    fn test_environment_override() {
        let registry = SnapshotRegistry::new(snapshot())
            .with_environment(VariableScope::new().with("HOME", "/home/app").with("USER", "app"));
        let env = registry.environment();
        assert_eq!(env.get("HOME"), Some("/home/app"));
        assert_eq!(env.get("LANG"), Some("C"));
        assert_eq!(env.get("USER"), Some("app"));
    }
}
