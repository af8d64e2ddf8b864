//! Link Expression Domain - Core types
//!
//! This crate defines the data model of the link expression engine:
//! placeholders and parsed expressions, variable scopes with precedence and
//! shadowing, diagnostics, declared value types and validation outcomes.
//! All types here are pure Rust with no I/O dependencies.

pub mod completion;
pub mod diagnostic;
pub mod environment;
pub mod error;
pub mod expression;
pub mod os;
pub mod settings;
pub mod validation;
pub mod value_type;

pub use completion::{CompletionCandidate, CompletionCategory};
pub use diagnostic::Diagnostic;
pub use environment::{
    DeploymentPaths, Owner, OwnerFacts, ProcessScope, ResolutionContext, ResolvedVariable,
    ScopeEntry, ScopeKind, SpecialConstants, SpecialDirectory, SpecialNamespace, VariableScope,
};
pub use error::{DomainError, DomainResult};
pub use expression::{Expression, FieldValue, Placeholder, ResolvedValue, Segment, TokenKind};
pub use os::OperatingSystem;
pub use settings::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS, EngineSettings, UnknownTokenPolicy};
pub use validation::{ModeViolation, ValidationFailure, ValidationResult};
pub use value_type::{PORT_RANGE, ValueType};
