//! Expression model: tokens, segments, field values and resolved values

mod field;
mod resolved;
mod segment;
mod token;

pub use field::FieldValue;
pub use resolved::ResolvedValue;
pub use segment::{
    CLOSING_DELIMITER, Expression, OPENING_DELIMITER, Placeholder, SEPARATOR, Segment,
};
pub use token::{ENVIRONMENT_TOKEN, PARAMETER_TOKEN, PATH_TOKEN, TokenKind, VARIABLE_TOKEN};
