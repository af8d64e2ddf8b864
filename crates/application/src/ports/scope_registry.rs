//! Scope registry port
//!
//! Read-only access to the configuration snapshot that variable scopes are
//! built from.

use linkexpr_domain::environment::{ProcessScope, VariableScope};

/// Errors that can occur while reading the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Instance or system not found.
    #[error("{0}")]
    NotFound(String),

    /// The registry could not be read.
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Configuration of one instance as seen by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceRecord {
    /// Instance identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Deployed version, used in path constants.
    pub tag: Option<String>,
    /// Directory the instance is deployed below.
    pub deployment_root: Option<String>,
    /// Host the instance runs on.
    pub hostname: Option<String>,
    /// Identifier of the owning system.
    pub system_id: Option<String>,
    /// Custom instance variables.
    pub variables: VariableScope,
    /// Processes of the instance, in configuration order.
    pub processes: Vec<ProcessScope>,
}

/// Configuration of one system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemRecord {
    /// System identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Custom system variables.
    pub variables: VariableScope,
}

/// Read-only accessor for the configuration snapshot.
pub trait ScopeRegistry: Send + Sync {
    /// Loads an instance by id.
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if the instance doesn't exist.
    fn instance(&self, instance_id: &str) -> Result<InstanceRecord, RegistryError>;

    /// Loads a system by id.
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if the system doesn't exist.
    fn system(&self, system_id: &str) -> Result<SystemRecord, RegistryError>;

    /// Values available through the `ENV` token. Empty by default.
    fn environment(&self) -> VariableScope {
        VariableScope::new()
    }
}
