//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::SerializationError;

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Fields and map entries in declaration/insertion order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(SerializationError::JsonSerialize)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::JsonDeserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stable_serialization_format() {
        let mut map = IndexMap::new();
        map.insert("zeta", "1");
        map.insert("alpha", "2");

        let json = to_json_stable(&map).expect("serialization should work");
        assert_eq!(json, "{\n  \"zeta\": \"1\",\n  \"alpha\": \"2\"\n}\n");
    }

    #[test]
    fn test_from_json_error() {
        let result: Result<IndexMap<String, String>, _> = from_json(r#"{"key": }"#);
        assert!(matches!(result, Err(SerializationError::JsonDeserialize(_))));
    }
}
