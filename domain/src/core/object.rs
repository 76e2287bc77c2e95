//! Canonical object projection shared by every protocol value object.
//!
//! [`WireObject::to_object`] renders the canonical JSON mapping (absent
//! optional fields are omitted, never `null`); [`WireObject::from_object`]
//! rebuilds children and then re-enters the validating constructor, so wire
//! data and in-process construction share one validation path.

use super::error::ValidationError;
use serde::Serialize;
use serde_json::{Map, Value};

/// A protocol value object with a canonical JSON projection.
pub trait WireObject: Serialize + Sized {
    /// Error produced when a decoded mapping cannot be turned back into `Self`.
    type Error: From<ValidationError>;

    /// Rebuild the value object from an already-decoded JSON mapping.
    fn from_object(value: &Value) -> Result<Self, Self::Error>;

    /// Render the canonical mapping.
    fn to_object(&self) -> Value {
        // Derived serializers over string-keyed maps cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Typed field access over a decoded JSON mapping.
///
/// Explicit `null` is treated exactly like an absent key.
pub(crate) struct ObjectReader<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> ObjectReader<'a> {
    pub(crate) fn new(entity: &'static str, value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { entity, map }),
            other => Err(ValidationError::new(entity, other.clone(), "an object")),
        }
    }

    pub(crate) fn field(&self, key: &str) -> String {
        format!("{}.{}", self.entity, key)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn string(&self, key: &str) -> Result<Option<String>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ValidationError::new(self.field(key), other.clone(), "a string")),
        }
    }

    pub(crate) fn number(&self, key: &str) -> Result<Option<f64>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(ValidationError::new(self.field(key), other.clone(), "a number")),
        }
    }

    pub(crate) fn boolean(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(ValidationError::new(self.field(key), other.clone(), "a boolean")),
        }
    }

    pub(crate) fn object(&self, key: &str) -> Result<Option<&'a Map<String, Value>>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(m)) => Ok(Some(m)),
            Some(other) => Err(ValidationError::new(self.field(key), other.clone(), "an object")),
        }
    }

    pub(crate) fn strings(&self, key: &str) -> Result<Option<Vec<String>>, ValidationError> {
        self.list(key, |item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ValidationError::new(
                self.field(key),
                other.clone(),
                "an array of strings",
            )),
        })
    }

    /// Map every element of an array field through `f`.
    pub(crate) fn list<T, E>(
        &self,
        key: &str,
        f: impl Fn(&'a Value) -> Result<T, E>,
    ) -> Result<Option<Vec<T>>, E>
    where
        E: From<ValidationError>,
    {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => items.iter().map(f).collect::<Result<Vec<_>, _>>().map(Some),
            Some(other) => Err(ValidationError::new(self.field(key), other.clone(), "an array").into()),
        }
    }

    /// Rebuild a nested value object.
    pub(crate) fn nested<T, E>(
        &self,
        key: &str,
        f: impl FnOnce(&'a Value) -> Result<T, E>,
    ) -> Result<Option<T>, E> {
        self.get(key).map(f).transpose()
    }
}

/// `true` when a trimmed string carries content.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Require a non-blank string field.
pub(crate) fn require_text(
    field: &str,
    value: Option<String>,
    expected: &str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !is_blank(&v) => Ok(v),
        Some(v) => Err(ValidationError::new(field, Value::String(v), expected)),
        None => Err(ValidationError::missing(field, expected)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reader_rejects_non_object() {
        let err = ObjectReader::new("Span", &json!([1, 2])).err().unwrap();
        assert_eq!(err.field, "Span");
    }

    #[test]
    fn test_null_is_absent() {
        let value = json!({"reason": null});
        let reader = ObjectReader::new("Event", &value).unwrap();
        assert_eq!(reader.string("reason").unwrap(), None);
    }

    #[test]
    fn test_wrong_type_names_field() {
        let value = json!({"confidence": "high"});
        let reader = ObjectReader::new("Token", &value).unwrap();
        let err = reader.number("confidence").unwrap_err();
        assert_eq!(err.field, "Token.confidence");
        assert_eq!(err.received, json!("high"));
    }

    #[test]
    fn test_strings_list() {
        let value = json!({"keyphrases": ["weather", "forecast"]});
        let reader = ObjectReader::new("Capability", &value).unwrap();
        assert_eq!(
            reader.strings("keyphrases").unwrap(),
            Some(vec!["weather".to_string(), "forecast".to_string()])
        );
        assert!(reader.strings("missing").unwrap().is_none());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("X.a", Some("  ".into()), "text").is_err());
        assert!(require_text("X.a", None, "text").is_err());
        assert_eq!(require_text("X.a", Some("ok".into()), "text").unwrap(), "ok");
    }
}
