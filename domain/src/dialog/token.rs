//! Token value object - one unit of content inside a feature.

use super::dialog_event::DialogEvent;
use super::span::Span;
use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject};
use crate::util::json_path;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// A token carries either an inline `value` or a `valueUrl`, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<String>,
}

/// Construction input for [`Token`]
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub value: Option<Value>,
    pub value_url: Option<String>,
    pub span: Option<Span>,
    pub confidence: Option<f64>,
    /// JSON Path expressions into the owning dialog event's features
    pub links: Vec<String>,
}

impl Token {
    pub fn new(options: TokenOptions) -> Result<Self, ValidationError> {
        let TokenOptions {
            value,
            value_url,
            span,
            confidence,
            links,
        } = options;

        // JSON null is "no value", same as on the wire.
        let value = value.filter(|v| !v.is_null());

        match (&value, &value_url) {
            (Some(v), Some(url)) => {
                return Err(ValidationError::new(
                    "Token.value",
                    serde_json::json!({ "value": v, "valueUrl": url }),
                    "exactly one of value or valueUrl",
                ));
            }
            (None, None) => {
                return Err(ValidationError::missing(
                    "Token.value",
                    "exactly one of value or valueUrl",
                ));
            }
            _ => {}
        }

        if let Some(c) = confidence
            && !(0.0..=1.0).contains(&c)
        {
            return Err(ValidationError::new(
                "Token.confidence",
                serde_json::json!(c),
                "a number in [0, 1]",
            ));
        }

        Ok(Self {
            value,
            value_url,
            span,
            confidence,
            links,
        })
    }

    /// A token holding an inline value.
    pub fn value(value: impl Into<Value>) -> Result<Self, ValidationError> {
        Self::new(TokenOptions {
            value: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn inline_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn value_url(&self) -> Option<&str> {
        self.value_url.as_deref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Resolve each link against `event`'s rendered features mapping.
    ///
    /// Paths are rooted at the features object (`$.text.tokens[0].value`).
    /// Every match yields a `(path, value)` pair; links that are malformed or
    /// match nothing are logged and skipped.
    pub fn get_linked_values(&self, event: &DialogEvent) -> Vec<(String, Value)> {
        let features = event.features_object();
        let mut resolved = Vec::new();

        for link in &self.links {
            match json_path::query(&features, link) {
                Ok(values) if values.is_empty() => {
                    warn!("Token link {} did not resolve in dialog event {}", link, event.id());
                }
                Ok(values) => {
                    resolved.extend(values.into_iter().map(|v| (link.clone(), v.clone())));
                }
                Err(e) => {
                    warn!("Skipping token link in dialog event {}: {}", event.id(), e);
                }
            }
        }

        resolved
    }
}

impl WireObject for Token {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Token", value)?;
        Token::new(TokenOptions {
            value: reader.get("value").cloned(),
            value_url: reader.string("valueUrl")?,
            span: reader.nested("span", Span::from_object)?,
            confidence: reader.number("confidence")?,
            links: reader.strings("links")?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::feature::TextFeature;
    use crate::dialog::dialog_event::DialogEventOptions;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn with_confidence(c: f64) -> Result<Token, ValidationError> {
        Token::new(TokenOptions {
            value: Some(json!("hi")),
            confidence: Some(c),
            ..Default::default()
        })
    }

    #[test]
    fn test_value_and_url_rejected() {
        let result = Token::new(TokenOptions {
            value: Some(json!("hi")),
            value_url: Some("https://example.com/audio.wav".into()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_neither_value_nor_url_rejected() {
        let err = Token::new(TokenOptions::default()).unwrap_err();
        assert_eq!(err.field, "Token.value");
    }

    #[test]
    fn test_url_only_accepted() {
        let token = Token::new(TokenOptions {
            value_url: Some("https://example.com/audio.wav".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(token.value_url(), Some("https://example.com/audio.wav"));
        assert!(token.inline_value().is_none());
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(with_confidence(1.5).is_err());
        assert!(with_confidence(-0.1).is_err());
        assert!(with_confidence(0.0).is_ok());
        assert!(with_confidence(1.0).is_ok());
        assert!(with_confidence(f64::NAN).is_err());
    }

    #[test]
    fn test_non_string_value_kept() {
        let token = Token::value(json!({"lat": 1.0, "lon": 2.0})).unwrap();
        assert_eq!(token.to_object(), json!({"value": {"lat": 1.0, "lon": 2.0}}));
    }

    #[test]
    fn test_round_trip_with_span_and_links() {
        let token = Token::new(TokenOptions {
            value: Some(json!("Paris")),
            span: Some(Span::starting_after(250)),
            confidence: Some(0.9),
            links: vec!["$.text.tokens[0].value".into()],
            ..Default::default()
        })
        .unwrap();
        let rebuilt = Token::from_object(&token.to_object()).unwrap();
        assert_eq!(rebuilt, token);
    }

    #[test]
    fn test_get_linked_values_skips_unresolved() {
        let mut features = BTreeMap::new();
        features.insert(
            "text".to_string(),
            TextFeature::new(["book", "a", "flight"]).into_feature(),
        );
        let event = DialogEvent::new(DialogEventOptions {
            id: Some("de-1".into()),
            speaker_uri: Some("tag:example.com,2025:user".into()),
            span: Some(Span::now()),
            features: Some(features),
            ..Default::default()
        })
        .unwrap();

        let token = Token::new(TokenOptions {
            value: Some(json!("flight")),
            links: vec![
                "$.text.tokens[2].value".into(),
                "$.audio.tokens[0].value".into(),
                "not a path".into(),
            ],
            ..Default::default()
        })
        .unwrap();

        let linked = token.get_linked_values(&event);
        assert_eq!(linked, vec![("$.text.tokens[2].value".to_string(), json!("flight"))]);
    }
}
