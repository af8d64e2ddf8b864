//! Application use cases (engine orchestration).

mod build_context;
mod evaluate_field;

pub use build_context::BuildContext;
pub use evaluate_field::{BatchEvaluation, EvaluateField, FieldEvaluation};
