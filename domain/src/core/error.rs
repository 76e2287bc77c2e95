//! Domain error types

use serde_json::Value;
use thiserror::Error;

/// A value object rejected its construction input.
///
/// Carries the offending field (qualified by entity, e.g. `Token.confidence`),
/// the value that was received (`null` when the field was missing) and a
/// description of the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: expected {expected}, received {received}")]
pub struct ValidationError {
    pub field: String,
    pub received: Value,
    pub expected: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, received: Value, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            received,
            expected: expected.into(),
        }
    }

    /// A required field was absent.
    pub fn missing(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(field, Value::Null, expected)
    }
}

/// Protocol-level errors raised while decoding or building wire objects
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Malformed JSON: {0}")]
    Parse(String),
}

impl ProtocolError {
    /// Check if this error came from an unrecognized event tag
    pub fn is_unknown_event_type(&self) -> bool {
        matches!(self, ProtocolError::UnknownEventType(_))
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new("Token.confidence", json!(1.5), "a number in [0, 1]");
        assert_eq!(
            error.to_string(),
            "invalid Token.confidence: expected a number in [0, 1], received 1.5"
        );
    }

    #[test]
    fn test_missing_field_received_null() {
        let error = ValidationError::missing("Sender.speakerUri", "a URI string");
        assert_eq!(error.received, Value::Null);
        assert!(error.to_string().contains("Sender.speakerUri"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: ProtocolError = serde_json::from_str::<Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ProtocolError::Parse(_)));
        assert!(!err.is_unknown_event_type());
    }

    #[test]
    fn test_unknown_event_type_check() {
        assert!(ProtocolError::UnknownEventType("nudge".to_string()).is_unknown_event_type());
    }
}
