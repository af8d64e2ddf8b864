//! Evaluate field use case
//!
//! Produces the preview and the validation outcome of configuration fields,
//! and decides whether a batch of fields may be saved.

use linkexpr_domain::environment::ResolutionContext;
use linkexpr_domain::expression::{FieldValue, ResolvedValue};
use linkexpr_domain::{DomainError, EngineSettings, ValidationResult};
use tracing::debug;

use crate::error::ApplicationResult;
use crate::variable_resolver::{PreviewRenderer, validate_field};

/// Preview and validation of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvaluation {
    /// Best-effort rendering for display.
    pub preview: ResolvedValue,
    /// Strict outcome deciding whether the field may be saved.
    pub validation: ValidationResult,
}

impl FieldEvaluation {
    /// Returns true if the field may be saved.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }
}

/// Evaluations of a batch of named fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchEvaluation {
    /// Evaluations in input order.
    pub fields: Vec<(String, FieldEvaluation)>,
}

impl BatchEvaluation {
    /// Returns true if every field is valid.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.fields.iter().all(|(_, evaluation)| evaluation.is_valid())
    }

    /// Names of the fields that block saving.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, evaluation)| !evaluation.is_valid())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// `(field, placeholder)` for every unresolved placeholder.
    #[must_use]
    pub fn offending_placeholders(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .flat_map(|(name, evaluation)| {
                evaluation
                    .validation
                    .offending_placeholders()
                    .into_iter()
                    .map(move |placeholder| (name.as_str(), placeholder))
            })
            .collect()
    }

    /// Converts a batch with invalid fields into an error naming each field
    /// and its reasons.
    ///
    /// # Errors
    /// Returns `ApplicationError::Domain` with `DomainError::ValidationFailed`
    /// if any field is invalid.
    pub fn into_result(self) -> ApplicationResult<()> {
        let reasons: Vec<String> = self
            .fields
            .iter()
            .filter_map(|(name, evaluation)| {
                evaluation
                    .validation
                    .reason()
                    .map(|reason| format!("{name}: {reason}"))
            })
            .collect();
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed(reasons.join("; ")).into())
        }
    }
}

/// Evaluates fields against one resolution context.
pub struct EvaluateField<'a> {
    renderer: PreviewRenderer<'a>,
}

impl<'a> EvaluateField<'a> {
    /// Creates a new `EvaluateField` use case.
    #[must_use]
    pub fn new(context: &'a ResolutionContext) -> Self {
        Self {
            renderer: PreviewRenderer::new(context),
        }
    }

    /// Replaces the engine settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.renderer = self.renderer.with_settings(settings);
        self
    }

    /// Evaluates one field.
    #[must_use]
    pub fn execute(&self, field: &FieldValue) -> FieldEvaluation {
        let preview = self.renderer.render_field(field);
        let validation = validate_field(field, &preview);
        FieldEvaluation {
            preview,
            validation,
        }
    }

    /// Evaluates a batch of named fields.
    pub fn execute_all<'f, I>(&self, fields: I) -> BatchEvaluation
    where
        I: IntoIterator<Item = (&'f str, &'f FieldValue)>,
    {
        let fields: Vec<_> = fields
            .into_iter()
            .map(|(name, field)| (name.to_string(), self.execute(field)))
            .collect();
        let batch = BatchEvaluation { fields };
        debug!(
            fields = batch.fields.len(),
            invalid = batch.invalid_fields().len(),
            "fields evaluated"
        );
        batch
    }
}
