//! Protocol events - the twelve tagged actions an envelope can carry.
//!
//! [`EventType`] is the wire tag, [`EventKind`] the closed sum type of
//! per-tag parameters, and [`Event`] adds the shared `to` / `reason` fields.
//! Every dispatch over tags is an exhaustive `match` without a wildcard arm,
//! so adding a variant fails to compile until each dispatch site handles it.

use super::routing::To;
use crate::core::error::{ProtocolError, ValidationError};
use crate::core::object::{ObjectReader, WireObject};
use crate::dialog::DialogEvent;
use crate::manifest::Manifest;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Wire tag of an event.
///
/// Manifest publication is spelled `publishManifests` (plural) everywhere;
/// the singular `publishManifest` is not a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Utterance,
    Context,
    Invite,
    Uninvite,
    DeclineInvite,
    Bye,
    GetManifests,
    PublishManifests,
    RequestFloor,
    GrantFloor,
    RevokeFloor,
    YieldFloor,
}

impl EventType {
    pub const ALL: [EventType; 12] = [
        EventType::Utterance,
        EventType::Context,
        EventType::Invite,
        EventType::Uninvite,
        EventType::DeclineInvite,
        EventType::Bye,
        EventType::GetManifests,
        EventType::PublishManifests,
        EventType::RequestFloor,
        EventType::GrantFloor,
        EventType::RevokeFloor,
        EventType::YieldFloor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Utterance => "utterance",
            EventType::Context => "context",
            EventType::Invite => "invite",
            EventType::Uninvite => "uninvite",
            EventType::DeclineInvite => "declineInvite",
            EventType::Bye => "bye",
            EventType::GetManifests => "getManifests",
            EventType::PublishManifests => "publishManifests",
            EventType::RequestFloor => "requestFloor",
            EventType::GrantFloor => "grantFloor",
            EventType::RevokeFloor => "revokeFloor",
            EventType::YieldFloor => "yieldFloor",
        }
    }

    /// Parameter keys the tag gives a meaning to; anything else is carried
    /// through untouched.
    pub fn modeled_parameters(&self) -> &'static [&'static str] {
        match self {
            EventType::Utterance => &["dialogEvent"],
            EventType::Context => &["dialogHistory"],
            EventType::GetManifests => &["recommendScope"],
            EventType::PublishManifests => &["servicingManifests", "discoveryManifests"],
            EventType::Invite
            | EventType::Uninvite
            | EventType::DeclineInvite
            | EventType::Bye
            | EventType::RequestFloor
            | EventType::GrantFloor
            | EventType::RevokeFloor
            | EventType::YieldFloor => &[],
        }
    }

    /// Floor-control directives and requests.
    pub fn is_floor_event(&self) -> bool {
        matches!(
            self,
            EventType::RequestFloor
                | EventType::GrantFloor
                | EventType::RevokeFloor
                | EventType::YieldFloor
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownEventType(s.to_string()))
    }
}

/// Which manifests a `getManifests` requester wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendScope {
    External,
    #[default]
    Internal,
    All,
}

impl RecommendScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendScope::External => "external",
            RecommendScope::Internal => "internal",
            RecommendScope::All => "all",
        }
    }
}

impl FromStr for RecommendScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "external" => Ok(RecommendScope::External),
            "internal" => Ok(RecommendScope::Internal),
            "all" => Ok(RecommendScope::All),
            _ => Err(ValidationError::new(
                "getManifests.parameters.recommendScope",
                Value::String(s.to_string()),
                "one of external, internal, all",
            )),
        }
    }
}

/// Tag-specific parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Utterance {
        dialog_event: DialogEvent,
    },
    Context {
        dialog_history: Vec<DialogEvent>,
    },
    Invite,
    Uninvite,
    DeclineInvite,
    Bye,
    GetManifests {
        recommend_scope: Option<RecommendScope>,
    },
    PublishManifests {
        servicing_manifests: Vec<Manifest>,
        discovery_manifests: Vec<Manifest>,
    },
    RequestFloor,
    GrantFloor,
    RevokeFloor,
    YieldFloor,
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Utterance { .. } => EventType::Utterance,
            EventKind::Context { .. } => EventType::Context,
            EventKind::Invite => EventType::Invite,
            EventKind::Uninvite => EventType::Uninvite,
            EventKind::DeclineInvite => EventType::DeclineInvite,
            EventKind::Bye => EventType::Bye,
            EventKind::GetManifests { .. } => EventType::GetManifests,
            EventKind::PublishManifests { .. } => EventType::PublishManifests,
            EventKind::RequestFloor => EventType::RequestFloor,
            EventKind::GrantFloor => EventType::GrantFloor,
            EventKind::RevokeFloor => EventType::RevokeFloor,
            EventKind::YieldFloor => EventType::YieldFloor,
        }
    }

    /// Canonical parameters for the modeled keys.
    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        match self {
            EventKind::Utterance { dialog_event } => {
                params.insert("dialogEvent".into(), dialog_event.to_object());
            }
            EventKind::Context { dialog_history } => {
                if !dialog_history.is_empty() {
                    params.insert(
                        "dialogHistory".into(),
                        Value::Array(dialog_history.iter().map(WireObject::to_object).collect()),
                    );
                }
            }
            EventKind::GetManifests { recommend_scope } => {
                if let Some(scope) = recommend_scope {
                    params.insert("recommendScope".into(), Value::String(scope.as_str().into()));
                }
            }
            EventKind::PublishManifests {
                servicing_manifests,
                discovery_manifests,
            } => {
                params.insert(
                    "servicingManifests".into(),
                    Value::Array(servicing_manifests.iter().map(WireObject::to_object).collect()),
                );
                if !discovery_manifests.is_empty() {
                    params.insert(
                        "discoveryManifests".into(),
                        Value::Array(discovery_manifests.iter().map(WireObject::to_object).collect()),
                    );
                }
            }
            EventKind::Invite
            | EventKind::Uninvite
            | EventKind::DeclineInvite
            | EventKind::Bye
            | EventKind::RequestFloor
            | EventKind::GrantFloor
            | EventKind::RevokeFloor
            | EventKind::YieldFloor => {}
        }
        params
    }

    /// The tag-dispatch factory: rebuild parameters for a recognized tag.
    fn from_parameters(
        event_type: EventType,
        parameters: Option<&Value>,
    ) -> Result<Self, ProtocolError> {
        let empty = Value::Object(Map::new());
        let reader = ObjectReader::new("parameters", parameters.unwrap_or(&empty))?;

        Ok(match event_type {
            EventType::Utterance => EventKind::Utterance {
                dialog_event: reader
                    .nested("dialogEvent", DialogEvent::from_object)?
                    .ok_or_else(|| {
                        ValidationError::missing("utterance.parameters.dialogEvent", "a dialog event")
                    })?,
            },
            EventType::Context => EventKind::Context {
                dialog_history: reader
                    .list("dialogHistory", DialogEvent::from_object)?
                    .unwrap_or_default(),
            },
            EventType::Invite => EventKind::Invite,
            EventType::Uninvite => EventKind::Uninvite,
            EventType::DeclineInvite => EventKind::DeclineInvite,
            EventType::Bye => EventKind::Bye,
            EventType::GetManifests => EventKind::GetManifests {
                recommend_scope: reader
                    .string("recommendScope")?
                    .map(|s| s.parse::<RecommendScope>())
                    .transpose()?,
            },
            EventType::PublishManifests => EventKind::PublishManifests {
                servicing_manifests: reader
                    .list("servicingManifests", Manifest::from_object)?
                    .ok_or_else(|| {
                        ValidationError::missing(
                            "publishManifests.parameters.servicingManifests",
                            "an array of manifests",
                        )
                    })?,
                discovery_manifests: reader
                    .list("discoveryManifests", Manifest::from_object)?
                    .unwrap_or_default(),
            },
            EventType::RequestFloor => EventKind::RequestFloor,
            EventType::GrantFloor => EventKind::GrantFloor,
            EventType::RevokeFloor => EventKind::RevokeFloor,
            EventType::YieldFloor => EventKind::YieldFloor,
        })
    }
}

/// A single tagged action within an envelope.
///
/// Parameter keys the tag does not model are kept in `extra` and rendered
/// back verbatim, so relaying an event never loses wire data.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    to: Option<To>,
    reason: Option<String>,
    extra: Map<String, Value>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            to: None,
            reason: None,
            extra: Map::new(),
        }
    }

    /// Build an event from its wire parts. Unknown tags are rejected.
    pub fn from_parts(
        event_type: &str,
        to: Option<To>,
        reason: Option<String>,
        parameters: Option<&Value>,
    ) -> Result<Self, ProtocolError> {
        let event_type: EventType = event_type.parse()?;
        let modeled = event_type.modeled_parameters();
        let extra: Map<String, Value> = parameters
            .and_then(Value::as_object)
            .map(|params| {
                params
                    .iter()
                    .filter(|(key, _)| !modeled.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            kind: EventKind::from_parameters(event_type, parameters)?,
            to,
            reason,
            extra,
        })
    }

    pub fn utterance(dialog_event: DialogEvent) -> Self {
        Self::new(EventKind::Utterance { dialog_event })
    }

    pub fn context(dialog_history: Vec<DialogEvent>) -> Self {
        Self::new(EventKind::Context { dialog_history })
    }

    pub fn invite() -> Self {
        Self::new(EventKind::Invite)
    }

    pub fn uninvite() -> Self {
        Self::new(EventKind::Uninvite)
    }

    pub fn decline_invite() -> Self {
        Self::new(EventKind::DeclineInvite)
    }

    pub fn bye() -> Self {
        Self::new(EventKind::Bye)
    }

    pub fn get_manifests(recommend_scope: Option<RecommendScope>) -> Self {
        Self::new(EventKind::GetManifests { recommend_scope })
    }

    pub fn publish_manifests(servicing: Vec<Manifest>, discovery: Vec<Manifest>) -> Self {
        Self::new(EventKind::PublishManifests {
            servicing_manifests: servicing,
            discovery_manifests: discovery,
        })
    }

    pub fn request_floor() -> Self {
        Self::new(EventKind::RequestFloor)
    }

    pub fn grant_floor() -> Self {
        Self::new(EventKind::GrantFloor)
    }

    pub fn revoke_floor() -> Self {
        Self::new(EventKind::RevokeFloor)
    }

    pub fn yield_floor() -> Self {
        Self::new(EventKind::YieldFloor)
    }

    /// Same event, addressed to `to`.
    pub fn with_to(mut self, to: To) -> Self {
        self.to = Some(to);
        self
    }

    /// Same event, carrying an additional parameter. Keys the tag models are
    /// always rendered from the event itself and win over `extra`.
    pub fn with_extra_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Same event, with a free-text or reserved (`@...`) reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn to(&self) -> Option<&To> {
        self.to.as_ref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Parameters the tag does not model, as received.
    pub fn extra_parameters(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// The full `parameters` object, `None` when there is nothing to carry.
    pub fn parameters(&self) -> Option<Value> {
        let mut params = self.kind.parameters();
        for (key, value) in &self.extra {
            if !params.contains_key(key) {
                params.insert(key.clone(), value.clone());
            }
        }
        (!params.is_empty()).then_some(Value::Object(params))
    }

    /// An event with no `to` is addressed to everyone.
    pub fn is_addressed_to(&self, speaker_uri: &str, service_url: Option<&str>) -> bool {
        match &self.to {
            None => true,
            Some(to) => to.targets(speaker_uri, service_url),
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("eventType", self.event_type().as_str())?;
        if let Some(to) = &self.to {
            map.serialize_entry("to", to)?;
        }
        if let Some(reason) = &self.reason {
            map.serialize_entry("reason", reason)?;
        }
        if let Some(parameters) = self.parameters() {
            map.serialize_entry("parameters", &parameters)?;
        }
        map.end()
    }
}

impl WireObject for Event {
    type Error = ProtocolError;

    fn from_object(value: &Value) -> Result<Self, ProtocolError> {
        let reader = ObjectReader::new("Event", value)?;
        let event_type = reader
            .string("eventType")?
            .ok_or_else(|| ValidationError::missing("Event.eventType", "an event type tag"))?;
        if let Some(parameters) = reader.get("parameters")
            && !parameters.is_object()
        {
            return Err(
                ValidationError::new("Event.parameters", parameters.clone(), "an object").into(),
            );
        }

        Event::from_parts(
            &event_type,
            reader.nested("to", To::from_object)?,
            reader.string("reason")?,
            reader.get("parameters"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Capability, CapabilityOptions, Identification, IdentificationOptions};
    use serde_json::json;

    fn manifest() -> Manifest {
        let identification = Identification::new(IdentificationOptions {
            speaker_uri: Some("tag:example.com,2025:agent-1".into()),
            service_url: Some("https://agent-1.example.com".into()),
            organization: Some("Example".into()),
            conversational_name: Some("Agent One".into()),
            synopsis: Some("Test agent".into()),
            ..Default::default()
        })
        .unwrap();
        let capability = Capability::new(CapabilityOptions {
            keyphrases: vec!["test".into()],
            descriptions: vec!["Testing".into()],
            ..Default::default()
        })
        .unwrap();
        Manifest::new(identification, vec![capability])
    }

    #[test]
    fn test_every_tag_round_trips_through_from_str() {
        for t in EventType::ALL {
            assert_eq!(t.as_str().parse::<EventType>().unwrap(), t);
        }
    }

    #[test]
    fn test_singular_publish_manifest_is_unknown() {
        let err = "publishManifest".parse::<EventType>().unwrap_err();
        assert!(err.is_unknown_event_type());
    }

    #[test]
    fn test_unknown_tag_fails_at_factory() {
        let err = Event::from_object(&json!({"eventType": "nudge"})).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownEventType("nudge".into()));
    }

    #[test]
    fn test_missing_event_type() {
        let err = Event::from_object(&json!({"reason": "x"})).unwrap_err();
        assert!(matches!(err, ProtocolError::Validation(e) if e.field == "Event.eventType"));
    }

    #[test]
    fn test_parameterless_event_omits_parameters() {
        let event = Event::grant_floor()
            .with_to(To::speaker("tag:example.com,2025:agent-1"))
            .with_reason("@timedOut");
        assert_eq!(
            event.to_object(),
            json!({
                "eventType": "grantFloor",
                "to": {"speakerUri": "tag:example.com,2025:agent-1"},
                "reason": "@timedOut"
            })
        );
    }

    #[test]
    fn test_utterance_requires_dialog_event() {
        let err = Event::from_object(&json!({"eventType": "utterance"})).unwrap_err();
        assert!(
            matches!(err, ProtocolError::Validation(e) if e.field == "utterance.parameters.dialogEvent")
        );
    }

    #[test]
    fn test_utterance_round_trip() {
        let dialog_event = DialogEvent::text("tag:example.com,2025:user-1", "hello").unwrap();
        let event = Event::utterance(dialog_event);
        let rebuilt = Event::from_object(&event.to_object()).unwrap();
        assert_eq!(rebuilt, event);
        assert_eq!(rebuilt.event_type(), EventType::Utterance);
    }

    #[test]
    fn test_publish_manifests_round_trip() {
        let event = Event::publish_manifests(vec![manifest()], vec![]);
        let object = event.to_object();
        assert!(object["parameters"].get("discoveryManifests").is_none());
        assert_eq!(Event::from_object(&object).unwrap(), event);
    }

    #[test]
    fn test_publish_manifests_requires_servicing() {
        let result = Event::from_object(&json!({"eventType": "publishManifests", "parameters": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_get_manifests_scope() {
        let event = Event::from_object(&json!({
            "eventType": "getManifests",
            "parameters": {"recommendScope": "external"}
        }))
        .unwrap();
        assert_eq!(
            event.kind(),
            &EventKind::GetManifests {
                recommend_scope: Some(RecommendScope::External)
            }
        );
        assert!(
            Event::from_object(&json!({
                "eventType": "getManifests",
                "parameters": {"recommendScope": "everywhere"}
            }))
            .is_err()
        );
    }

    #[test]
    fn test_unmodeled_parameters_survive_round_trip() {
        let wire = json!({
            "eventType": "bye",
            "reason": "@complete",
            "parameters": {"note": "see you"}
        });
        let event = Event::from_object(&wire).unwrap();
        assert_eq!(event.extra_parameters().get("note"), Some(&json!("see you")));
        assert_eq!(event.to_object(), wire);

        let wire = json!({
            "eventType": "getManifests",
            "parameters": {"recommendScope": "all", "x-filter": {"lang": "en"}}
        });
        let event = Event::from_object(&wire).unwrap();
        assert_eq!(event.extra_parameters().len(), 1);
        assert_eq!(event.to_object(), wire);
    }

    #[test]
    fn test_modeled_keys_win_over_extra() {
        let event = Event::get_manifests(Some(RecommendScope::All))
            .with_extra_parameter("recommendScope", json!("external"))
            .with_extra_parameter("priority", json!(1));
        assert_eq!(
            event.parameters(),
            Some(json!({"recommendScope": "all", "priority": 1}))
        );
    }

    #[test]
    fn test_parameters_must_be_object() {
        let result = Event::from_object(&json!({"eventType": "bye", "parameters": [1]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_addressing() {
        let broadcast = Event::bye();
        assert!(broadcast.is_addressed_to("tag:anyone", None));

        let targeted = Event::invite().with_to(To::service("https://agent-1.example.com"));
        assert!(targeted.is_addressed_to("tag:x", Some("https://agent-1.example.com")));
        assert!(!targeted.is_addressed_to("tag:x", Some("https://agent-2.example.com")));
    }

    #[test]
    fn test_floor_event_classification() {
        assert!(EventType::YieldFloor.is_floor_event());
        assert!(!EventType::Invite.is_floor_event());
    }
}
