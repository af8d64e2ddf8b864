//! Scopes, path constants and special constants an expression resolves against

mod paths;
mod resolution;
mod scope;
mod specials;

pub use paths::{DeploymentPaths, SpecialDirectory};
pub use resolution::{Owner, ProcessScope, ResolutionContext};
pub use scope::{ResolvedVariable, ScopeEntry, ScopeKind, VariableScope};
pub use specials::{OwnerFacts, SpecialConstants, SpecialNamespace, keys};
