//! Routing value objects: who sent an envelope and whom an event addresses.

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject};
use crate::util::id::is_uri;
use serde::Serialize;
use serde_json::Value;

/// The conversant that produced an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    speaker_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_url: Option<String>,
}

impl Sender {
    pub fn new(
        speaker_uri: impl Into<String>,
        service_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let speaker_uri = speaker_uri.into();
        if !is_uri(&speaker_uri) {
            return Err(ValidationError::new(
                "Sender.speakerUri",
                Value::String(speaker_uri),
                "a URI (scheme:rest)",
            ));
        }
        Ok(Self {
            speaker_uri,
            service_url,
        })
    }

    pub fn speaker_uri(&self) -> &str {
        &self.speaker_uri
    }

    pub fn service_url(&self) -> Option<&str> {
        self.service_url.as_deref()
    }
}

impl WireObject for Sender {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Sender", value)?;
        let speaker_uri = reader
            .string("speakerUri")?
            .ok_or_else(|| ValidationError::missing("Sender.speakerUri", "a URI (scheme:rest)"))?;
        Sender::new(speaker_uri, reader.string("serviceUrl")?)
    }
}

/// Event addressee. At least one of `speakerUri` / `serviceUrl` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct To {
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_url: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    private: bool,
}

impl To {
    pub fn new(
        speaker_uri: Option<String>,
        service_url: Option<String>,
        private: bool,
    ) -> Result<Self, ValidationError> {
        if speaker_uri.is_none() && service_url.is_none() {
            return Err(ValidationError::missing(
                "To.speakerUri",
                "at least one of speakerUri or serviceUrl",
            ));
        }
        Ok(Self {
            speaker_uri,
            service_url,
            private,
        })
    }

    /// Address a conversant by speaker URI.
    pub fn speaker(speaker_uri: impl Into<String>) -> Self {
        Self {
            speaker_uri: Some(speaker_uri.into()),
            service_url: None,
            private: false,
        }
    }

    /// Address a conversant by service URL.
    pub fn service(service_url: impl Into<String>) -> Self {
        Self {
            speaker_uri: None,
            service_url: Some(service_url.into()),
            private: false,
        }
    }

    /// Same addressee, delivered privately.
    pub fn privately(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn speaker_uri(&self) -> Option<&str> {
        self.speaker_uri.as_deref()
    }

    pub fn service_url(&self) -> Option<&str> {
        self.service_url.as_deref()
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Whether this addressee names the given conversant.
    pub fn targets(&self, speaker_uri: &str, service_url: Option<&str>) -> bool {
        self.speaker_uri.as_deref() == Some(speaker_uri)
            || (service_url.is_some() && self.service_url.as_deref() == service_url)
    }
}

impl WireObject for To {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("To", value)?;
        To::new(
            reader.string("speakerUri")?,
            reader.string("serviceUrl")?,
            reader.boolean("private")?.unwrap_or(false),
        )
    }
}
