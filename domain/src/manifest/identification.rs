//! Identification - who a conversant is.

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject, require_text};
use serde::Serialize;
use serde_json::Value;

/// Identity block shared by manifests and conversants.
///
/// `speakerUri`, `serviceUrl`, `organization`, `conversationalName` and
/// `synopsis` must all be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    speaker_uri: String,
    service_url: String,
    organization: String,
    conversational_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    synopsis: String,
}

/// Construction input for [`Identification`]
#[derive(Debug, Clone, Default)]
pub struct IdentificationOptions {
    pub speaker_uri: Option<String>,
    pub service_url: Option<String>,
    pub organization: Option<String>,
    pub conversational_name: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub synopsis: Option<String>,
}

impl Identification {
    pub fn new(options: IdentificationOptions) -> Result<Self, ValidationError> {
        Ok(Self {
            speaker_uri: require_text(
                "Identification.speakerUri",
                options.speaker_uri,
                "a non-empty speaker URI",
            )?,
            service_url: require_text(
                "Identification.serviceUrl",
                options.service_url,
                "a non-empty service URL",
            )?,
            organization: require_text(
                "Identification.organization",
                options.organization,
                "a non-empty organization",
            )?,
            conversational_name: require_text(
                "Identification.conversationalName",
                options.conversational_name,
                "a non-empty conversational name",
            )?,
            department: options.department,
            role: options.role,
            synopsis: require_text(
                "Identification.synopsis",
                options.synopsis,
                "a non-empty synopsis",
            )?,
        })
    }

    pub fn speaker_uri(&self) -> &str {
        &self.speaker_uri
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn conversational_name(&self) -> &str {
        &self.conversational_name
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn synopsis(&self) -> &str {
        &self.synopsis
    }
}

impl WireObject for Identification {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Identification", value)?;
        Identification::new(IdentificationOptions {
            speaker_uri: reader.string("speakerUri")?,
            service_url: reader.string("serviceUrl")?,
            organization: reader.string("organization")?,
            conversational_name: reader.string("conversationalName")?,
            department: reader.string("department")?,
            role: reader.string("role")?,
            synopsis: reader.string("synopsis")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> IdentificationOptions {
        IdentificationOptions {
            speaker_uri: Some("tag:weather.example.com,2025:agent".into()),
            service_url: Some("https://weather.example.com/ofp".into()),
            organization: Some("Example Weather".into()),
            conversational_name: Some("Stormy".into()),
            synopsis: Some("Weather forecasts".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_required_present() {
        let id = Identification::new(options()).unwrap();
        assert_eq!(id.conversational_name(), "Stormy");
        assert!(id.department().is_none());
    }

    #[test]
    fn test_empty_required_rejected() {
        let err = Identification::new(IdentificationOptions {
            organization: Some("".into()),
            ..options()
        })
        .unwrap_err();
        assert_eq!(err.field, "Identification.organization");

        let err = Identification::new(IdentificationOptions {
            synopsis: None,
            ..options()
        })
        .unwrap_err();
        assert_eq!(err.field, "Identification.synopsis");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let object = Identification::new(options()).unwrap().to_object();
        assert!(object.get("department").is_none());
        assert!(object.get("role").is_none());
        assert_eq!(object["conversationalName"], json!("Stormy"));
    }

    #[test]
    fn test_round_trip() {
        let id = Identification::new(IdentificationOptions {
            role: Some("forecaster".into()),
            department: Some("Meteorology".into()),
            ..options()
        })
        .unwrap();
        assert_eq!(Identification::from_object(&id.to_object()).unwrap(), id);
    }
}
