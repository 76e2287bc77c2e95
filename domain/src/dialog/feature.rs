//! Feature value objects - named content channels within a dialog event.

use super::token::Token;
use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject, require_text};
use serde::Serialize;
use serde_json::Value;

/// Encodings a feature may declare.
pub const SUPPORTED_ENCODINGS: [&str; 4] = ["ISO-8859-1", "iso-8859-1", "UTF-8", "utf-8"];

/// A channel of content (text, ssml, audio, ...) made of ordered tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_schema: Option<String>,
    tokens: Vec<Token>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternates: Vec<Vec<Token>>,
}

/// Construction input for [`Feature`]
#[derive(Debug, Clone, Default)]
pub struct FeatureOptions {
    pub mime_type: Option<String>,
    pub tokens: Option<Vec<Token>>,
    /// Alternative hypotheses, each an ordered token sequence
    pub alternates: Vec<Vec<Token>>,
    pub lang: Option<String>,
    pub encoding: Option<String>,
    pub token_schema: Option<String>,
}

impl Feature {
    pub fn new(options: FeatureOptions) -> Result<Self, ValidationError> {
        let mime_type = require_text("Feature.mimeType", options.mime_type, "a MIME type")?;
        let tokens = options
            .tokens
            .ok_or_else(|| ValidationError::missing("Feature.tokens", "an array of tokens"))?;

        if let Some(encoding) = &options.encoding
            && !SUPPORTED_ENCODINGS.contains(&encoding.as_str())
        {
            return Err(ValidationError::new(
                "Feature.encoding",
                Value::String(encoding.clone()),
                format!("one of {}", SUPPORTED_ENCODINGS.join(", ")),
            ));
        }

        Ok(Self {
            mime_type,
            lang: options.lang,
            encoding: options.encoding,
            token_schema: options.token_schema,
            tokens,
            alternates: options.alternates,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn alternates(&self) -> &[Vec<Token>] {
        &self.alternates
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn token_schema(&self) -> Option<&str> {
        self.token_schema.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.mime_type == TextFeature::MIME_TYPE
    }
}

impl WireObject for Feature {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Feature", value)?;
        let alternates = reader
            .list("alternates", |alt| {
                let Value::Array(tokens) = alt else {
                    return Err(ValidationError::new(
                        "Feature.alternates",
                        alt.clone(),
                        "an array of token arrays",
                    ));
                };
                tokens
                    .iter()
                    .map(Token::from_object)
                    .collect::<Result<Vec<_>, _>>()
            })?
            .unwrap_or_default();

        Feature::new(FeatureOptions {
            mime_type: reader.string("mimeType")?,
            tokens: reader.list("tokens", Token::from_object)?,
            alternates,
            lang: reader.string("lang")?,
            encoding: reader.string("encoding")?,
            token_schema: reader.string("tokenSchema")?,
        })
    }
}

/// A `text/plain` feature whose token values are strings.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFeature(Feature);

impl TextFeature {
    pub const MIME_TYPE: &'static str = "text/plain";

    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = values
            .into_iter()
            .map(|v| Token::value(Value::String(v.into())))
            // A string value alone always satisfies the token invariants.
            .filter_map(Result::ok)
            .collect();

        Self(Feature {
            mime_type: Self::MIME_TYPE.to_string(),
            lang: None,
            encoding: None,
            token_schema: None,
            tokens,
            alternates: Vec::new(),
        })
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.0.lang = Some(lang.into());
        self
    }

    /// View an existing feature as text, if it is `text/plain` with string values.
    pub fn from_feature(feature: Feature) -> Result<Self, ValidationError> {
        if !feature.is_text() {
            return Err(ValidationError::new(
                "TextFeature.mimeType",
                Value::String(feature.mime_type.clone()),
                TextFeature::MIME_TYPE,
            ));
        }
        if let Some(bad) = feature
            .tokens
            .iter()
            .find(|t| !matches!(t.inline_value(), Some(Value::String(_))))
        {
            return Err(ValidationError::new(
                "TextFeature.tokens",
                bad.to_object(),
                "tokens with string values",
            ));
        }
        Ok(Self(feature))
    }

    /// Token values joined by single spaces.
    pub fn text(&self) -> String {
        self.0
            .tokens
            .iter()
            .filter_map(|t| t.inline_value().and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn feature(&self) -> &Feature {
        &self.0
    }

    pub fn into_feature(self) -> Feature {
        self.0
    }
}

impl From<TextFeature> for Feature {
    fn from(text: TextFeature) -> Self {
        text.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mime_type_required() {
        let err = Feature::new(FeatureOptions {
            tokens: Some(vec![]),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "Feature.mimeType");
    }

    #[test]
    fn test_tokens_required() {
        let err = Feature::new(FeatureOptions {
            mime_type: Some("text/plain".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "Feature.tokens");
    }

    #[test]
    fn test_encoding_checked() {
        let build = |encoding: &str| {
            Feature::new(FeatureOptions {
                mime_type: Some("text/plain".into()),
                tokens: Some(vec![]),
                encoding: Some(encoding.into()),
                ..Default::default()
            })
        };
        assert!(build("UTF-8").is_ok());
        assert!(build("iso-8859-1").is_ok());
        assert!(build("UTF-16").is_err());
    }

    #[test]
    fn test_text_feature() {
        let text = TextFeature::new(["hello", "world"]).with_lang("en");
        assert_eq!(text.text(), "hello world");
        assert_eq!(
            Feature::from(text).to_object(),
            json!({
                "mimeType": "text/plain",
                "lang": "en",
                "tokens": [{"value": "hello"}, {"value": "world"}]
            })
        );
    }

    #[test]
    fn test_text_feature_rejects_other_mime() {
        let feature = Feature::new(FeatureOptions {
            mime_type: Some("application/ssml+xml".into()),
            tokens: Some(vec![]),
            ..Default::default()
        })
        .unwrap();
        assert!(TextFeature::from_feature(feature).is_err());
    }

    #[test]
    fn test_round_trip_with_alternates() {
        let value = json!({
            "mimeType": "text/plain",
            "tokens": [{"value": "recognize speech", "confidence": 0.8}],
            "alternates": [[{"value": "wreck a nice beach", "confidence": 0.2}]]
        });
        let feature = Feature::from_object(&value).unwrap();
        assert_eq!(feature.alternates().len(), 1);
        assert_eq!(feature.to_object(), value);
    }

    #[test]
    fn test_bad_alternate_shape() {
        let value = json!({
            "mimeType": "text/plain",
            "tokens": [],
            "alternates": [{"value": "x"}]
        });
        let err = Feature::from_object(&value).unwrap_err();
        assert_eq!(err.field, "Feature.alternates");
    }
}
