//! Expression resolution engine
//!
//! Resolves placeholders against a [`ResolutionContext`] according to scope
//! precedence, expanding values that contain further placeholders.

use linkexpr_domain::environment::{ResolutionContext, ResolvedVariable, ScopeKind};
use linkexpr_domain::expression::{Expression, Placeholder, ResolvedValue, Segment, TokenKind};
use linkexpr_domain::{Diagnostic, EngineSettings};
use tracing::{debug, trace};

use super::os_selector;
use super::parser::{has_placeholders, parse};

/// Identity of a scope entry being expanded.
type ChainLink = (ScopeKind, Option<String>, String);

/// Output and diagnostics accumulated while expanding one expression.
#[derive(Default)]
struct Expansion {
    value: String,
    diagnostics: Vec<Diagnostic>,
    chain: Vec<ChainLink>,
    expansions: usize,
}

/// The expression resolution engine.
///
/// Borrows its context and holds no mutable state; every call is
/// independent.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    context: &'a ResolutionContext,
    settings: EngineSettings,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver with default settings.
    #[must_use]
    pub fn new(context: &'a ResolutionContext) -> Self {
        Self {
            context,
            settings: EngineSettings::default(),
        }
    }

    /// Replaces the engine settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the context.
    #[must_use]
    pub const fn context(&self) -> &'a ResolutionContext {
        self.context
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Resolves a parsed expression.
    ///
    /// OS selectors are evaluated for the context's target OS. Placeholders
    /// that cannot be resolved stay verbatim and are reported.
    #[must_use]
    pub fn resolve(&self, expression: &Expression) -> ResolvedValue {
        let mut expansion = Expansion::default();
        self.expand(expression, None, &mut expansion);
        ResolvedValue {
            value: expansion.value,
            diagnostics: expansion.diagnostics,
        }
    }

    /// Parses and resolves a raw value. A value that does not parse is
    /// returned verbatim with an `UnbalancedDelimiters` diagnostic.
    #[must_use]
    pub fn resolve_str(&self, raw: &str) -> ResolvedValue {
        match parse(raw) {
            Ok(expression) => self.resolve(&expression),
            Err(err) => {
                debug!(error = %err, "expression does not parse");
                ResolvedValue::new(raw).with_diagnostic(err.to_diagnostic())
            }
        }
    }

    /// Looks up one placeholder without expanding its value.
    #[must_use]
    pub fn lookup(&self, placeholder: &Placeholder) -> Option<ResolvedVariable> {
        self.lookup_in(placeholder, None)
    }

    /// Returns the raw text of every placeholder in `raw` that would be left
    /// unresolved.
    #[must_use]
    pub fn find_unresolved(&self, raw: &str) -> Vec<String> {
        self.resolve_str(raw)
            .unresolved_placeholders()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn expand(&self, expression: &Expression, process: Option<&str>, out: &mut Expansion) {
        for segment in expression.segments() {
            match segment {
                Segment::Literal(text) => out.value.push_str(text),
                Segment::Placeholder(placeholder) => {
                    self.expand_placeholder(placeholder, process, out);
                }
            }
        }
    }

    fn expand_placeholder(&self, placeholder: &Placeholder, process: Option<&str>, out: &mut Expansion) {
        let budget = self.settings.max_expansions;
        if out.expansions >= budget {
            if out.expansions == budget {
                debug!(placeholder = %placeholder, budget, "expansion budget exhausted");
                out.expansions += 1;
            }
            out.value.push_str(&placeholder.raw);
            out.diagnostics.push(Diagnostic::ExpansionLimit {
                placeholder: placeholder.raw.clone(),
                limit: budget,
            });
            return;
        }
        out.expansions += 1;

        match placeholder.kind {
            TokenKind::OsSelector(selector) => {
                let target = self.context.target_os;
                out.value
                    .push_str(os_selector::select(selector, target, &placeholder.key));
                return;
            }
            TokenKind::Unknown => {
                out.value.push_str(&placeholder.raw);
                if self.settings.unknown_tokens.reports() {
                    out.diagnostics.push(Diagnostic::UnknownToken {
                        placeholder: placeholder.raw.clone(),
                        token: placeholder.token.clone(),
                    });
                }
                return;
            }
            _ => {}
        }

        let Some(found) = self.lookup_in(placeholder, process) else {
            out.value.push_str(&placeholder.raw);
            out.diagnostics.push(Diagnostic::unresolved(&placeholder.raw));
            return;
        };

        if !has_placeholders(&found.value) {
            out.value.push_str(&found.value);
            return;
        }

        let link: ChainLink = (found.scope, found.process.clone(), found.key.clone());
        let limit = self.settings.max_depth;
        if out.chain.len() >= limit || out.chain.contains(&link) {
            debug!(
                placeholder = %placeholder,
                depth = out.chain.len(),
                limit,
                "expansion cut off"
            );
            out.value.push_str(&placeholder.raw);
            out.diagnostics.push(Diagnostic::DepthExceeded {
                placeholder: placeholder.raw.clone(),
                limit,
            });
            return;
        }

        match parse(&found.value) {
            Ok(nested) => {
                // Unqualified references inside a process value belong to that process.
                let owner = found.process.as_deref().or(process);
                out.chain.push(link);
                self.expand(&nested, owner, out);
                out.chain.pop();
            }
            Err(err) => {
                out.value.push_str(&found.value);
                out.diagnostics.push(err.to_diagnostic());
            }
        }
    }

    fn lookup_in(&self, placeholder: &Placeholder, process: Option<&str>) -> Option<ResolvedVariable> {
        let context = self.context;
        let key = placeholder.key.as_str();
        let found = match placeholder.kind {
            TokenKind::Variable => context.resolve_variable(key, process),
            TokenKind::Parameter => {
                let (qualifier, key) = placeholder.qualified_key();
                context.resolve_parameter(qualifier, key, process)
            }
            TokenKind::Path => context.resolve_path(key),
            TokenKind::Special(namespace) => context.resolve_special(namespace, key),
            TokenKind::Environment => context.resolve_environment(key),
            TokenKind::OsSelector(_) | TokenKind::Unknown => None,
        };
        trace!(
            placeholder = %placeholder,
            scope = found.as_ref().map(|f| f.scope.display_name()),
            "lookup"
        );
        found
    }
}

/// Resolves an expression with default settings.
#[must_use]
pub fn resolve(expression: &Expression, context: &ResolutionContext) -> ResolvedValue {
    VariableResolver::new(context).resolve(expression)
}
