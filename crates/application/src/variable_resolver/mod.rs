//! Link expression engine
//!
//! Parses `{{TOKEN:KEY}}` placeholders, resolves them against scoped
//! variables, evaluates OS selectors, validates resolved values and
//! enumerates completions.
//!
//! # Usage
//!
//! ```
//! use linkexpr_application::variable_resolver::{PreviewRenderer, validate};
//! use linkexpr_domain::environment::{ResolutionContext, VariableScope};
//! use linkexpr_domain::{OperatingSystem, ValueType};
//!
//! let ctx = ResolutionContext::new(OperatingSystem::Linux)
//!     .with_instance(VariableScope::new().with("api.port", "1234"));
//!
//! let raw = "{{X:api.port}}";
//! let preview = PreviewRenderer::new(&ctx).render(raw);
//! assert_eq!(preview.value, "1234");
//!
//! let result = validate(&preview, ValueType::Port, true, raw);
//! assert!(result.is_valid());
//! ```

pub mod completion;
pub mod engine;
pub mod os_selector;
pub mod parser;
pub mod preview;
pub mod validator;

pub use completion::{CompletionEnumerator, complete};
pub use engine::{VariableResolver, resolve};
pub use parser::{delimiter_counts, extract_placeholders, has_placeholders, parse};
pub use preview::PreviewRenderer;
pub use validator::{validate, validate_field, validate_mode, validate_type};
