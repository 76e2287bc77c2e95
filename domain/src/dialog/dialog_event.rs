//! DialogEvent - a structured utterance record.

use super::feature::{Feature, TextFeature};
use super::span::Span;
use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject, require_text};
use crate::util::id::new_uuid;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One speaker's contribution, made of named features.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEvent {
    id: String,
    speaker_uri: String,
    span: Span,
    features: BTreeMap<String, Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

/// Construction input for [`DialogEvent`]
#[derive(Debug, Clone, Default)]
pub struct DialogEventOptions {
    pub id: Option<String>,
    pub speaker_uri: Option<String>,
    pub span: Option<Span>,
    pub features: Option<BTreeMap<String, Feature>>,
    pub previous_id: Option<String>,
    pub context: Option<String>,
}

impl DialogEvent {
    /// Feature name used for plain text content.
    pub const TEXT_FEATURE: &'static str = "text";

    pub fn new(options: DialogEventOptions) -> Result<Self, ValidationError> {
        let id = require_text("DialogEvent.id", options.id, "a non-empty id")?;
        let speaker_uri = require_text(
            "DialogEvent.speakerUri",
            options.speaker_uri,
            "a non-empty speaker URI",
        )?;
        let span = options
            .span
            .ok_or_else(|| ValidationError::missing("DialogEvent.span", "a span"))?;
        let features = options.features.ok_or_else(|| {
            ValidationError::missing("DialogEvent.features", "a mapping of name to feature")
        })?;

        Ok(Self {
            id,
            speaker_uri,
            span,
            features,
            previous_id: options.previous_id,
            context: options.context,
        })
    }

    /// A text utterance starting now, with a freshly generated id.
    pub fn text(
        speaker_uri: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let mut features = BTreeMap::new();
        features.insert(
            Self::TEXT_FEATURE.to_string(),
            TextFeature::new([text.into()]).into_feature(),
        );

        Self::new(DialogEventOptions {
            id: Some(new_uuid()),
            speaker_uri: Some(speaker_uri.into()),
            span: Some(Span::now()),
            features: Some(features),
            ..Default::default()
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn speaker_uri(&self) -> &str {
        &self.speaker_uri
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn features(&self) -> &BTreeMap<String, Feature> {
        &self.features
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }

    pub fn previous_id(&self) -> Option<&str> {
        self.previous_id.as_deref()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Content of the `text` feature, when it is plain text.
    pub fn text_content(&self) -> Option<String> {
        self.feature(Self::TEXT_FEATURE)
            .cloned()
            .and_then(|f| TextFeature::from_feature(f).ok())
            .map(|t| t.text())
    }

    /// The rendered features mapping, the root for token link paths.
    pub fn features_object(&self) -> Value {
        serde_json::to_value(&self.features).unwrap_or(Value::Null)
    }
}

impl WireObject for DialogEvent {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("DialogEvent", value)?;

        let features = reader
            .object("features")?
            .map(|map| {
                map.iter()
                    .map(|(name, feature)| Ok((name.clone(), Feature::from_object(feature)?)))
                    .collect::<Result<BTreeMap<_, _>, ValidationError>>()
            })
            .transpose()?;

        DialogEvent::new(DialogEventOptions {
            id: reader.string("id")?,
            speaker_uri: reader.string("speakerUri")?,
            span: reader.nested("span", Span::from_object)?,
            features,
            previous_id: reader.string("previousId")?,
            context: reader.string("context")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPEAKER: &str = "tag:example.com,2025:user-1";

    #[test]
    fn test_required_fields() {
        let err = DialogEvent::new(DialogEventOptions {
            speaker_uri: Some(SPEAKER.into()),
            span: Some(Span::now()),
            features: Some(BTreeMap::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "DialogEvent.id");

        let err = DialogEvent::new(DialogEventOptions {
            id: Some("de-1".into()),
            speaker_uri: Some(SPEAKER.into()),
            span: Some(Span::now()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "DialogEvent.features");
    }

    #[test]
    fn test_text_helper() {
        let event = DialogEvent::text(SPEAKER, "What's the weather?").unwrap();
        assert_eq!(event.speaker_uri(), SPEAKER);
        assert_eq!(event.text_content().as_deref(), Some("What's the weather?"));
        assert_eq!(event.id().len(), 36);
    }

    #[test]
    fn test_from_object() {
        let value = json!({
            "id": "de-42",
            "speakerUri": SPEAKER,
            "span": {"startTime": "2025-03-01T10:00:00Z"},
            "features": {
                "text": {"mimeType": "text/plain", "tokens": [{"value": "hi"}]}
            },
            "previousId": "de-41"
        });
        let event = DialogEvent::from_object(&value).unwrap();
        assert_eq!(event.previous_id(), Some("de-41"));
        assert_eq!(event.text_content().as_deref(), Some("hi"));
        assert_eq!(event.to_object(), value);
    }

    #[test]
    fn test_nested_error_surfaces() {
        let value = json!({
            "id": "de-1",
            "speakerUri": SPEAKER,
            "span": {"startTime": "2025-03-01T10:00:00Z"},
            "features": {"text": {"mimeType": "text/plain", "tokens": [{}]}}
        });
        let err = DialogEvent::from_object(&value).unwrap_err();
        assert_eq!(err.field, "Token.value");
    }

    #[test]
    fn test_round_trip() {
        let event = DialogEvent::text(SPEAKER, "round trip").unwrap();
        assert_eq!(DialogEvent::from_object(&event.to_object()).unwrap(), event);
    }
}
