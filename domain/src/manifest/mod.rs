//! Manifest subdomain - how conversants describe themselves.
//!
//! A [`Manifest`] pairs an [`Identification`] with the [`Capability`] list a
//! conversant advertises in `publishManifests` events.

pub mod capability;
pub mod identification;

pub use capability::{Capability, CapabilityOptions, SupportedLayers};
pub use identification::{Identification, IdentificationOptions};

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject};
use serde::Serialize;
use serde_json::Value;

/// Identity plus advertised capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    identification: Identification,
    capabilities: Vec<Capability>,
}

impl Manifest {
    pub fn new(identification: Identification, capabilities: Vec<Capability>) -> Self {
        Self {
            identification,
            capabilities,
        }
    }

    pub fn identification(&self) -> &Identification {
        &self.identification
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn speaker_uri(&self) -> &str {
        self.identification.speaker_uri()
    }

    pub fn service_url(&self) -> &str {
        self.identification.service_url()
    }

    /// Whether any capability advertises `phrase`.
    pub fn supports(&self, phrase: &str) -> bool {
        self.capabilities.iter().any(|c| c.matches_keyphrase(phrase))
    }
}

impl WireObject for Manifest {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Manifest", value)?;
        let identification = reader
            .nested("identification", Identification::from_object)?
            .ok_or_else(|| {
                ValidationError::missing("Manifest.identification", "an identification object")
            })?;
        let capabilities = reader
            .list("capabilities", Capability::from_object)?
            .unwrap_or_default();

        Ok(Manifest::new(identification, capabilities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest_json() -> Value {
        json!({
            "identification": {
                "speakerUri": "tag:weather.example.com,2025:agent",
                "serviceUrl": "https://weather.example.com/ofp",
                "organization": "Example Weather",
                "conversationalName": "Stormy",
                "synopsis": "Weather forecasts"
            },
            "capabilities": [{
                "keyphrases": ["weather"],
                "descriptions": ["Provides forecasts"],
                "supportedLayers": {"input": ["text"], "output": ["text"]}
            }]
        })
    }

    #[test]
    fn test_from_object() {
        let manifest = Manifest::from_object(&manifest_json()).unwrap();
        assert_eq!(manifest.speaker_uri(), "tag:weather.example.com,2025:agent");
        assert!(manifest.supports("Weather"));
        assert_eq!(manifest.to_object(), manifest_json());
    }

    #[test]
    fn test_identification_required() {
        let err = Manifest::from_object(&json!({"capabilities": []})).unwrap_err();
        assert_eq!(err.field, "Manifest.identification");
    }

    #[test]
    fn test_invalid_capability_rejected() {
        let mut value = manifest_json();
        value["capabilities"][0]["keyphrases"] = json!([]);
        let err = Manifest::from_object(&value).unwrap_err();
        assert_eq!(err.field, "Capability.keyphrases");
    }
}
