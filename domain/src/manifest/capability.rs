//! Capability - what a conversant can do.

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject};
use serde::Serialize;
use serde_json::Value;

/// Input/output modalities a capability supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedLayers {
    pub input: Vec<String>,
    pub output: Vec<String>,
}

impl Default for SupportedLayers {
    fn default() -> Self {
        Self {
            input: vec!["text".to_string()],
            output: vec!["text".to_string()],
        }
    }
}

impl WireObject for SupportedLayers {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("SupportedLayers", value)?;
        let defaults = SupportedLayers::default();
        Ok(Self {
            input: reader.strings("input")?.unwrap_or(defaults.input),
            output: reader.strings("output")?.unwrap_or(defaults.output),
        })
    }
}

/// One advertised capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    keyphrases: Vec<String>,
    descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    languages: Option<Vec<String>>,
    supported_layers: SupportedLayers,
}

/// Construction input for [`Capability`]
#[derive(Debug, Clone, Default)]
pub struct CapabilityOptions {
    pub keyphrases: Vec<String>,
    pub descriptions: Vec<String>,
    pub languages: Option<Vec<String>>,
    pub supported_layers: Option<SupportedLayers>,
}

impl Capability {
    pub fn new(options: CapabilityOptions) -> Result<Self, ValidationError> {
        if options.keyphrases.is_empty() {
            return Err(ValidationError::new(
                "Capability.keyphrases",
                Value::Array(Vec::new()),
                "a non-empty array of keyphrases",
            ));
        }
        if options.descriptions.is_empty() {
            return Err(ValidationError::new(
                "Capability.descriptions",
                Value::Array(Vec::new()),
                "a non-empty array of descriptions",
            ));
        }

        Ok(Self {
            keyphrases: options.keyphrases,
            descriptions: options.descriptions,
            languages: options.languages,
            supported_layers: options.supported_layers.unwrap_or_default(),
        })
    }

    pub fn keyphrases(&self) -> &[String] {
        &self.keyphrases
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn languages(&self) -> Option<&[String]> {
        self.languages.as_deref()
    }

    pub fn supported_layers(&self) -> &SupportedLayers {
        &self.supported_layers
    }

    /// Case-insensitive keyphrase match.
    pub fn matches_keyphrase(&self, phrase: &str) -> bool {
        let phrase = phrase.to_lowercase();
        self.keyphrases.iter().any(|k| k.to_lowercase() == phrase)
    }
}

impl WireObject for Capability {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Capability", value)?;
        Capability::new(CapabilityOptions {
            keyphrases: reader.strings("keyphrases")?.ok_or_else(|| {
                ValidationError::missing("Capability.keyphrases", "a non-empty array of keyphrases")
            })?,
            descriptions: reader.strings("descriptions")?.ok_or_else(|| {
                ValidationError::missing(
                    "Capability.descriptions",
                    "a non-empty array of descriptions",
                )
            })?,
            languages: reader.strings("languages")?,
            supported_layers: reader.nested("supportedLayers", SupportedLayers::from_object)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather() -> CapabilityOptions {
        CapabilityOptions {
            keyphrases: vec!["weather".into(), "Forecast".into()],
            descriptions: vec!["Provides weather forecasts".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_supported_layers_to_text() {
        let capability = Capability::new(weather()).unwrap();
        assert_eq!(capability.supported_layers().input, vec!["text"]);
        assert_eq!(capability.supported_layers().output, vec!["text"]);
    }

    #[test]
    fn test_empty_keyphrases_rejected() {
        let err = Capability::new(CapabilityOptions {
            keyphrases: vec![],
            ..weather()
        })
        .unwrap_err();
        assert_eq!(err.field, "Capability.keyphrases");
        assert_eq!(err.received, json!([]));
    }

    #[test]
    fn test_wire_keyphrases_empty_versus_absent() {
        let empty = Capability::from_object(&json!({"keyphrases": [], "descriptions": ["x"]}))
            .unwrap_err();
        assert_eq!(empty.field, "Capability.keyphrases");
        assert_eq!(empty.received, json!([]));

        let absent = Capability::from_object(&json!({"descriptions": ["x"]})).unwrap_err();
        assert_eq!(absent.field, "Capability.keyphrases");
        assert_eq!(absent.received, Value::Null);
    }

    #[test]
    fn test_empty_descriptions_rejected() {
        let err = Capability::new(CapabilityOptions {
            descriptions: vec![],
            ..weather()
        })
        .unwrap_err();
        assert_eq!(err.field, "Capability.descriptions");
    }

    #[test]
    fn test_matches_keyphrase() {
        let capability = Capability::new(weather()).unwrap();
        assert!(capability.matches_keyphrase("forecast"));
        assert!(!capability.matches_keyphrase("flights"));
    }

    #[test]
    fn test_from_object_fills_missing_layer() {
        let capability = Capability::from_object(&json!({
            "keyphrases": ["weather"],
            "descriptions": ["forecasts"],
            "languages": ["en-us"],
            "supportedLayers": {"input": ["text", "voice"]}
        }))
        .unwrap();
        assert_eq!(capability.supported_layers().input, vec!["text", "voice"]);
        assert_eq!(capability.supported_layers().output, vec!["text"]);
        assert_eq!(Capability::from_object(&capability.to_object()).unwrap(), capability);
    }
}
