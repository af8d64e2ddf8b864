//! Build resolution context use case

use linkexpr_domain::environment::{
    DeploymentPaths, Owner, OwnerFacts, ResolutionContext, SpecialConstants, VariableScope,
};
use linkexpr_domain::OperatingSystem;
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::ScopeRegistry;

/// Builds the [`ResolutionContext`] of one owner from the registry.
pub struct BuildContext<R> {
    registry: R,
}

impl<R: ScopeRegistry> BuildContext<R> {
    /// Creates a new `BuildContext` use case.
    pub const fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `owner` - Instance, and optionally process, the expression belongs to
    /// * `target_os` - OS used for selectors and path rendering
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the instance, its system or
    /// the process doesn't exist.
    pub fn execute(
        &self,
        owner: &Owner,
        target_os: OperatingSystem,
    ) -> ApplicationResult<ResolutionContext> {
        let instance = self.registry.instance(&owner.instance_id)?;

        let system = instance
            .system_id
            .as_deref()
            .map(|id| self.registry.system(id))
            .transpose()?;

        let process = match owner.process_id.as_deref() {
            Some(id) => Some(
                instance
                    .processes
                    .iter()
                    .find(|p| p.id == id)
                    .ok_or_else(|| {
                        ApplicationError::NotFound(format!(
                            "process '{id}' in instance '{}'",
                            instance.id
                        ))
                    })?,
            ),
            None => None,
        };

        let paths = match (&instance.deployment_root, &instance.tag) {
            (Some(root), Some(tag)) => DeploymentPaths::new(root, &instance.id, tag).to_scope(target_os),
            _ => {
                debug!(instance = %instance.id, "no deployment root or tag, path constants unavailable");
                VariableScope::new()
            }
        };

        let specials = SpecialConstants::derive(&OwnerFacts {
            instance_id: &instance.id,
            instance_name: &instance.name,
            instance_tag: instance.tag.as_deref(),
            system_name: system.as_ref().map(|s| s.name.as_str()),
            process: process.map(|p| (p.id.as_str(), p.name.as_str())),
            hostname: instance.hostname.as_deref(),
        });

        let mut context = ResolutionContext::new(target_os)
            .with_instance(instance.variables.clone())
            .with_paths(paths)
            .with_specials(specials)
            .with_environment(self.registry.environment());
        if let Some(system) = system {
            context = context.with_system(system.variables);
        }
        if let Some(process) = process {
            context = context.with_current_process(&process.id);
        }
        context.processes = instance.processes;

        debug!(
            instance = %owner.instance_id,
            process = owner.process_id.as_deref(),
            target_os = %target_os,
            shadowed = context.shadowed_instance_keys().len(),
            "resolution context built"
        );

        Ok(context)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::{InstanceRecord, RegistryError, SystemRecord};
    use linkexpr_domain::environment::{ProcessScope, ScopeKind, SpecialNamespace};
    use pretty_assertions::assert_eq;

    struct StaticRegistry {
        instance: InstanceRecord,
        system: SystemRecord,
    }

    impl ScopeRegistry for StaticRegistry {
        fn instance(&self, instance_id: &str) -> Result<InstanceRecord, RegistryError> {
            if instance_id == self.instance.id {
                Ok(self.instance.clone())
            } else {
                Err(RegistryError::NotFound(format!("instance '{instance_id}'")))
            }
        }

        fn system(&self, system_id: &str) -> Result<SystemRecord, RegistryError> {
            if system_id == self.system.id {
                Ok(self.system.clone())
            } else {
                Err(RegistryError::NotFound(format!("system '{system_id}'")))
            }
        }

        fn environment(&self) -> VariableScope {
            VariableScope::new().with("HOME", "/home/app")
        }
    }

    fn registry() -> StaticRegistry {
        StaticRegistry {
            instance: InstanceRecord {
                id: "inst-1".to_string(),
                name: "Production".to_string(),
                tag: Some("4".to_string()),
                deployment_root: Some("/opt/deploy".to_string()),
                hostname: Some("node01".to_string()),
                system_id: Some("sys".to_string()),
                variables: VariableScope::new()
                    .with("custom.var", "instanceVariableValue")
                    .with("only.instance", "1"),
                processes: vec![
                    ProcessScope::new("web", "Web", VariableScope::new().with("port", "8080")),
                    ProcessScope::new("db", "Database", VariableScope::new()),
                ],
            },
            system: SystemRecord {
                id: "sys".to_string(),
                name: "Plant A".to_string(),
                variables: VariableScope::new().with("custom.var", "systemVariableValue"),
            },
        }
    }

    #[test]
    fn test_build_for_process() {
        let use_case = BuildContext::new(registry());
        let ctx = use_case
            .execute(&Owner::process("inst-1", "web"), OperatingSystem::Linux)
            .unwrap();

        assert_eq!(ctx.current_process().unwrap().name, "Web");
        assert_eq!(ctx.processes.len(), 2);
        assert_eq!(ctx.resolve_variable("custom.var", None).unwrap().scope, ScopeKind::System);
        assert_eq!(ctx.shadowed_instance_keys(), vec!["custom.var"]);
        assert_eq!(ctx.resolve_path("CONFIG").unwrap().value, "/opt/deploy/inst-1/bin/4/config");
        assert_eq!(ctx.specials.get(SpecialNamespace::Application, "NAME"), Some("Web"));
        assert_eq!(ctx.specials.get(SpecialNamespace::Instance, "SYSTEM"), Some("Plant A"));
        assert_eq!(ctx.resolve_environment("HOME").unwrap().value, "/home/app");
    }

    #[test]
    fn test_paths_follow_target_os() {
        let use_case = BuildContext::new(registry());
        let ctx = use_case
            .execute(&Owner::instance("inst-1"), OperatingSystem::Windows)
            .unwrap();
        assert_eq!(ctx.resolve_path("DATA").unwrap().value, "\\opt\\deploy\\inst-1\\data");
        assert!(ctx.current_process().is_none());
    }

    #[test]
    fn test_unknown_instance() {
        let use_case = BuildContext::new(registry());
        let err = use_case
            .execute(&Owner::instance("missing"), OperatingSystem::Linux)
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[test]
    fn test_unknown_process() {
        let use_case = BuildContext::new(registry());
        let err = use_case
            .execute(&Owner::process("inst-1", "cache"), OperatingSystem::Linux)
            .unwrap_err();
        assert_eq!(err.to_string(), "not found: process 'cache' in instance 'inst-1'");
    }
}
