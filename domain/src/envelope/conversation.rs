//! Conversation and its conversants.

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject, require_text};
use crate::manifest::Identification;
use serde::Serialize;
use serde_json::{Map, Value};

/// A participant bound to a conversation, with optional persisted state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversant {
    identification: Identification,
    #[serde(skip_serializing_if = "Map::is_empty")]
    persistent_state: Map<String, Value>,
}

impl Conversant {
    pub fn new(identification: Identification, persistent_state: Map<String, Value>) -> Self {
        Self {
            identification,
            persistent_state,
        }
    }

    pub fn identification(&self) -> &Identification {
        &self.identification
    }

    pub fn persistent_state(&self) -> &Map<String, Value> {
        &self.persistent_state
    }

    pub fn speaker_uri(&self) -> &str {
        self.identification.speaker_uri()
    }
}

impl WireObject for Conversant {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Conversant", value)?;
        let identification = reader
            .nested("identification", Identification::from_object)?
            .ok_or_else(|| {
                ValidationError::missing("Conversant.identification", "an identification object")
            })?;
        let persistent_state = reader.object("persistentState")?.cloned().unwrap_or_default();
        Ok(Conversant::new(identification, persistent_state))
    }
}

/// Conversation identity plus the known conversants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conversants: Vec<Conversant>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, conversants: Vec<Conversant>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_text("Conversation.id", Some(id.into()), "a non-empty conversation id")?,
            conversants,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn conversants(&self) -> &[Conversant] {
        &self.conversants
    }

    /// Same conversation identity, no conversant list.
    pub fn identity(&self) -> Self {
        Self {
            id: self.id.clone(),
            conversants: Vec::new(),
        }
    }
}

impl WireObject for Conversation {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Conversation", value)?;
        let id = reader
            .string("id")?
            .ok_or_else(|| ValidationError::missing("Conversation.id", "a non-empty conversation id"))?;
        let conversants = reader
            .list("conversants", Conversant::from_object)?
            .unwrap_or_default();
        Conversation::new(id, conversants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conversant_json() -> Value {
        json!({
            "identification": {
                "speakerUri": "tag:example.com,2025:agent-1",
                "serviceUrl": "https://agent-1.example.com",
                "organization": "Example",
                "conversationalName": "Agent One",
                "synopsis": "Test agent"
            },
            "persistentState": {"visits": 3}
        })
    }

    #[test]
    fn test_conversation_id_required() {
        assert!(Conversation::new("  ", vec![]).is_err());
        let err = Conversation::from_object(&json!({})).unwrap_err();
        assert_eq!(err.field, "Conversation.id");
    }

    #[test]
    fn test_conversants_round_trip() {
        let value = json!({"id": "conv-1", "conversants": [conversant_json()]});
        let conversation = Conversation::from_object(&value).unwrap();
        assert_eq!(conversation.conversants()[0].persistent_state()["visits"], json!(3));
        assert_eq!(conversation.to_object(), value);
    }

    #[test]
    fn test_identity_drops_conversants() {
        let value = json!({"id": "conv-1", "conversants": [conversant_json()]});
        let conversation = Conversation::from_object(&value).unwrap();
        assert_eq!(conversation.identity().to_object(), json!({"id": "conv-1"}));
    }

    #[test]
    fn test_conversant_requires_identification() {
        let err = Conversant::from_object(&json!({"persistentState": {}})).unwrap_err();
        assert_eq!(err.field, "Conversant.identification");
    }
}
