//! Link Expression Application - Engine, ports and use cases
//!
//! This crate defines the application layer with:
//! - The expression engine (parse, resolve, evaluate, validate, complete)
//! - Port traits for the external configuration registry
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult, SyntaxError};
pub use ports::{InstanceRecord, RegistryError, ScopeRegistry, SystemRecord};
pub use use_cases::{BatchEvaluation, BuildContext, EvaluateField, FieldEvaluation};
pub use variable_resolver::{
    CompletionEnumerator, PreviewRenderer, VariableResolver, complete, parse, resolve, validate,
};
