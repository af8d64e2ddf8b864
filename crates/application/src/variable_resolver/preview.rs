//! Best-effort preview rendering

use linkexpr_domain::environment::ResolutionContext;
use linkexpr_domain::expression::{FieldValue, ResolvedValue};
use linkexpr_domain::EngineSettings;

use super::engine::VariableResolver;
use super::parser::parse;

/// Renders field values for display.
///
/// Always produces a string: unresolved placeholders stay visible in place
/// and a value that does not parse is shown as typed.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRenderer<'a> {
    resolver: VariableResolver<'a>,
}

impl<'a> PreviewRenderer<'a> {
    /// Creates a renderer with default settings.
    #[must_use]
    pub fn new(context: &'a ResolutionContext) -> Self {
        Self {
            resolver: VariableResolver::new(context),
        }
    }

    /// Replaces the engine settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.resolver = self.resolver.with_settings(settings);
        self
    }

    /// Parses, resolves and evaluates OS selectors.
    #[must_use]
    pub fn render(&self, raw: &str) -> ResolvedValue {
        match parse(raw) {
            Ok(expression) if expression.has_placeholders() => self.resolver.resolve(&expression),
            Ok(_) => ResolvedValue::new(raw),
            Err(err) => ResolvedValue::new(raw).with_diagnostic(err.to_diagnostic()),
        }
    }

    /// Renders a field. Plain-mode values are returned untouched.
    #[must_use]
    pub fn render_field(&self, field: &FieldValue) -> ResolvedValue {
        if field.link_mode {
            self.render(&field.raw)
        } else {
            ResolvedValue::new(field.raw.as_str())
        }
    }
}
