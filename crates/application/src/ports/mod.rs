//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the engine and the systems that own
//! configuration data. Adapters in the infrastructure layer implement them.

mod scope_registry;

pub use scope_registry::{InstanceRecord, RegistryError, ScopeRegistry, SystemRecord};
