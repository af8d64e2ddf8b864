//! Resolution context for placeholder substitution
//!
//! Holds all variable sources of one owner with proper precedence.

use serde::{Deserialize, Serialize};

use super::scope::{ResolvedVariable, ScopeEntry, ScopeKind, VariableScope};
use super::specials::{SpecialConstants, SpecialNamespace};
use crate::os::OperatingSystem;

/// Identifies whose configuration an expression belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner {
    /// The instance holding the configuration.
    pub instance_id: String,
    /// The process within the instance, if the field belongs to a process.
    #[serde(default)]
    pub process_id: Option<String>,
}

impl Owner {
    /// Creates an owner for an instance-level field.
    #[must_use]
    pub fn instance(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            process_id: None,
        }
    }

    /// Creates an owner for a process-level field.
    #[must_use]
    pub fn process(instance_id: impl Into<String>, process_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            process_id: Some(process_id.into()),
        }
    }
}

/// The custom parameters of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessScope {
    /// Process identifier.
    pub id: String,
    /// Display name, also accepted as a qualifier in `{{V:name:param}}`.
    pub name: String,
    /// Parameter values keyed by parameter id.
    #[serde(default)]
    pub parameters: VariableScope,
}

impl ProcessScope {
    /// Creates a process scope.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, parameters: VariableScope) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters,
        }
    }

    /// Returns true if `qualifier` names this process by id or name.
    #[must_use]
    pub fn matches(&self, qualifier: &str) -> bool {
        self.id == qualifier || self.name == qualifier
    }
}

/// Holds all variable sources for resolution.
///
/// Variable (`X`) lookups use this precedence (highest wins):
/// 1. System variables
/// 2. Instance variables
/// 3. Parameters of the current process
///
/// Lower-precedence entries with the same key stay stored and are reported
/// as shadowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Operating system used for OS-selector evaluation and path rendering.
    pub target_os: OperatingSystem,

    /// Id of the process the expression belongs to.
    pub current_process: Option<String>,

    /// All processes of the instance.
    pub processes: Vec<ProcessScope>,

    /// Instance variables.
    pub instance: VariableScope,

    /// System variables, if the instance belongs to a system.
    pub system: Option<VariableScope>,

    /// Deployment path constants.
    pub paths: VariableScope,

    /// Computed special constants.
    pub specials: SpecialConstants,

    /// Environment values supplied by the caller.
    pub environment: VariableScope,
}

impl ResolutionContext {
    /// Creates an empty context for a target OS.
    #[must_use]
    pub fn new(target_os: OperatingSystem) -> Self {
        Self {
            target_os,
            current_process: None,
            processes: Vec::new(),
            instance: VariableScope::new(),
            system: None,
            paths: VariableScope::new(),
            specials: SpecialConstants::new(),
            environment: VariableScope::new(),
        }
    }

    /// Adds a process of the instance.
    #[must_use]
    pub fn with_process(mut self, process: ProcessScope) -> Self {
        self.processes.push(process);
        self
    }

    /// Sets the process the expression belongs to.
    #[must_use]
    pub fn with_current_process(mut self, process_id: impl Into<String>) -> Self {
        self.current_process = Some(process_id.into());
        self
    }

    /// Sets the instance variables.
    #[must_use]
    pub fn with_instance(mut self, instance: VariableScope) -> Self {
        self.instance = instance;
        self
    }

    /// Sets the system variables.
    #[must_use]
    pub fn with_system(mut self, system: VariableScope) -> Self {
        self.system = Some(system);
        self
    }

    /// Sets the path constants.
    #[must_use]
    pub fn with_paths(mut self, paths: VariableScope) -> Self {
        self.paths = paths;
        self
    }

    /// Sets the special constants.
    #[must_use]
    pub fn with_specials(mut self, specials: SpecialConstants) -> Self {
        self.specials = specials;
        self
    }

    /// Sets the environment values.
    #[must_use]
    pub fn with_environment(mut self, environment: VariableScope) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the process the expression belongs to.
    #[must_use]
    pub fn current_process(&self) -> Option<&ProcessScope> {
        let id = self.current_process.as_deref()?;
        self.process_by_id(id)
    }

    /// Finds a process by id.
    #[must_use]
    pub fn process_by_id(&self, id: &str) -> Option<&ProcessScope> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Finds a process by id, falling back to its name.
    #[must_use]
    pub fn find_process(&self, qualifier: &str) -> Option<&ProcessScope> {
        self.process_by_id(qualifier)
            .or_else(|| self.processes.iter().find(|p| p.name == qualifier))
    }

    /// Processes other than the current one, in configuration order.
    pub fn other_processes(&self) -> impl Iterator<Item = &ProcessScope> {
        let current = self.current_process.as_deref();
        self.processes
            .iter()
            .filter(move |p| Some(p.id.as_str()) != current)
    }

    /// Resolves a variable (`X`) key. `process` overrides the process whose
    /// parameters form the lowest-precedence scope.
    #[must_use]
    pub fn resolve_variable(&self, key: &str, process: Option<&str>) -> Option<ResolvedVariable> {
        if let Some(value) = self.system.as_ref().and_then(|s| s.get(key)) {
            return Some(ResolvedVariable::new(key, value, ScopeKind::System));
        }

        if let Some(value) = self.instance.get(key) {
            return Some(ResolvedVariable::new(key, value, ScopeKind::Instance));
        }

        let owner = match process {
            Some(id) => self.process_by_id(id),
            None => self.current_process(),
        }?;
        owner
            .parameters
            .get(key)
            .map(|value| ResolvedVariable::new(key, value, ScopeKind::Process).owned_by(&owner.id))
    }

    /// Resolves a process parameter (`V`). Without a qualifier the parameter
    /// is looked up in `process`, or the current process if `None`.
    #[must_use]
    pub fn resolve_parameter(
        &self,
        qualifier: Option<&str>,
        key: &str,
        process: Option<&str>,
    ) -> Option<ResolvedVariable> {
        let owner = match (qualifier, process) {
            (Some(q), _) => self.find_process(q),
            (None, Some(id)) => self.process_by_id(id),
            (None, None) => self.current_process(),
        }?;
        owner
            .parameters
            .get(key)
            .map(|value| ResolvedVariable::new(key, value, ScopeKind::Process).owned_by(&owner.id))
    }

    /// Resolves a deployment path constant (`P`).
    #[must_use]
    pub fn resolve_path(&self, key: &str) -> Option<ResolvedVariable> {
        self.paths
            .get(key)
            .map(|value| ResolvedVariable::new(key, value, ScopeKind::Path))
    }

    /// Resolves a special constant (`I`, `A`, `H`).
    #[must_use]
    pub fn resolve_special(&self, namespace: SpecialNamespace, key: &str) -> Option<ResolvedVariable> {
        self.specials
            .get(namespace, key)
            .map(|value| ResolvedVariable::new(key, value, ScopeKind::Special))
    }

    /// Resolves a caller-supplied environment value (`ENV`).
    #[must_use]
    pub fn resolve_environment(&self, key: &str) -> Option<ResolvedVariable> {
        self.environment
            .get(key)
            .map(|value| ResolvedVariable::new(key, value, ScopeKind::Environment))
    }

    /// Reports the state of an entry stored in one of the variable scopes.
    /// Returns `None` if the scope does not hold the key.
    #[must_use]
    pub fn variable_entry(&self, scope: ScopeKind, key: &str) -> Option<ScopeEntry> {
        let value = match scope {
            ScopeKind::System => self.system.as_ref()?.get(key)?,
            ScopeKind::Instance => self.instance.get(key)?,
            ScopeKind::Process => self.current_process()?.parameters.get(key)?,
            ScopeKind::Path | ScopeKind::Special | ScopeKind::Environment => {
                return None;
            }
        }
        .to_string();

        let shadowing = [ScopeKind::System, ScopeKind::Instance]
            .into_iter()
            .filter(|kind| kind.variable_precedence() > scope.variable_precedence())
            .find(|kind| self.variable_scope(*kind).is_some_and(|s| s.contains_key(key)));

        Some(match shadowing {
            Some(by) => ScopeEntry::Shadowed { value, by },
            None => ScopeEntry::Active { value },
        })
    }

    /// All instance variables with their shadowing state, in stored order.
    #[must_use]
    pub fn instance_entries(&self) -> Vec<(String, ScopeEntry)> {
        self.instance
            .keys()
            .filter_map(|key| {
                self.variable_entry(ScopeKind::Instance, key)
                    .map(|entry| (key.to_string(), entry))
            })
            .collect()
    }

    /// Keys of instance variables overridden by the system.
    #[must_use]
    pub fn shadowed_instance_keys(&self) -> Vec<&str> {
        match &self.system {
            Some(system) => self
                .instance
                .keys()
                .filter(|key| system.contains_key(key))
                .collect(),
            None => Vec::new(),
        }
    }

    fn variable_scope(&self, kind: ScopeKind) -> Option<&VariableScope> {
        match kind {
            ScopeKind::System => self.system.as_ref(),
            ScopeKind::Instance => Some(&self.instance),
            ScopeKind::Process => self.current_process().map(|p| &p.parameters),
            ScopeKind::Path => Some(&self.paths),
            ScopeKind::Environment => Some(&self.environment),
            ScopeKind::Special => None,
        }
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new(OperatingSystem::current())
    }
}
