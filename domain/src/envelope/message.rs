//! Envelope and Payload - the top-level message unit.

use super::conversation::Conversation;
use super::event::{Event, EventType};
use super::routing::Sender;
use super::schema::Schema;
use crate::core::error::{ProtocolError, ValidationError};
use crate::core::object::{ObjectReader, WireObject};
use serde::Serialize;
use serde_json::Value;

/// An immutable message: schema, conversation, sender and ordered events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    schema: Schema,
    conversation: Conversation,
    sender: Sender,
    events: Vec<Event>,
}

/// Construction input for [`Envelope`]
#[derive(Debug, Clone, Default)]
pub struct EnvelopeOptions {
    pub schema: Option<Schema>,
    pub conversation: Option<Conversation>,
    pub sender: Option<Sender>,
    pub events: Option<Vec<Event>>,
}

impl Envelope {
    pub fn new(options: EnvelopeOptions) -> Result<Self, ValidationError> {
        Ok(Self {
            schema: options
                .schema
                .ok_or_else(|| ValidationError::missing("Envelope.schema", "a schema object"))?,
            conversation: options.conversation.ok_or_else(|| {
                ValidationError::missing("Envelope.conversation", "a conversation object")
            })?,
            sender: options
                .sender
                .ok_or_else(|| ValidationError::missing("Envelope.sender", "a sender object"))?,
            events: options
                .events
                .ok_or_else(|| ValidationError::missing("Envelope.events", "an array of events"))?,
        })
    }

    /// Start accumulating events for a new envelope.
    pub fn builder(schema: Schema, conversation: Conversation, sender: Sender) -> EnvelopeBuilder {
        EnvelopeBuilder {
            schema,
            conversation,
            sender,
            events: Vec::new(),
        }
    }

    /// Skeleton for a reply: same schema and conversation identity, new sender, no events.
    pub fn reply_builder(&self, sender: Sender) -> EnvelopeBuilder {
        Envelope::builder(self.schema.clone(), self.conversation.identity(), sender)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events addressed to the given conversant (broadcast events included).
    pub fn events_for<'a>(
        &'a self,
        speaker_uri: &'a str,
        service_url: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |e| e.is_addressed_to(speaker_uri, service_url))
    }

    pub fn events_of_type(&self, event_type: EventType) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.event_type() == event_type)
    }

    /// Wrap in the wire payload.
    pub fn into_payload(self) -> Payload {
        Payload::new(self)
    }

    /// Parse a bare envelope object from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)?;
        Envelope::from_object(&value)
    }

    /// Canonical compact JSON of the bare envelope.
    pub fn to_json(&self) -> String {
        self.to_object().to_string()
    }
}

impl WireObject for Envelope {
    type Error = ProtocolError;

    fn from_object(value: &Value) -> Result<Self, ProtocolError> {
        let reader = ObjectReader::new("Envelope", value)?;
        Ok(Envelope::new(EnvelopeOptions {
            schema: reader.nested("schema", Schema::from_object)?,
            conversation: reader.nested("conversation", Conversation::from_object)?,
            sender: reader.nested("sender", Sender::from_object)?,
            events: reader.list("events", Event::from_object)?,
        })?)
    }
}

/// Mutable accumulator for outbound events.
///
/// Agents collect events here while processing and convert to an immutable
/// [`Envelope`] exactly once with [`EnvelopeBuilder::build`].
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    schema: Schema,
    conversation: Conversation,
    sender: Sender,
    events: Vec<Event>,
}

impl EnvelopeBuilder {
    pub fn push_event(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    /// Insert at `index`, clamped to the current length.
    pub fn insert_event(&mut self, index: usize, event: Event) -> &mut Self {
        let index = index.min(self.events.len());
        self.events.insert(index, event);
        self
    }

    pub fn extend_events(&mut self, events: impl IntoIterator<Item = Event>) -> &mut Self {
        self.events.extend(events);
        self
    }

    /// Consuming variant of [`push_event`](Self::push_event) for chained construction.
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn build(self) -> Envelope {
        Envelope {
            schema: self.schema,
            conversation: self.conversation,
            sender: self.sender,
            events: self.events,
        }
    }
}

/// Wire payload: one envelope under the `openFloor` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    #[serde(rename = "openFloor")]
    envelope: Envelope,
}

impl Payload {
    pub const KEY: &'static str = "openFloor";

    pub fn new(envelope: Envelope) -> Self {
        Self { envelope }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)?;
        Payload::from_object(&value)
    }

    pub fn to_json(&self) -> String {
        self.to_object().to_string()
    }
}

impl WireObject for Payload {
    type Error = ProtocolError;

    fn from_object(value: &Value) -> Result<Self, ProtocolError> {
        let reader = ObjectReader::new("Payload", value)?;
        let envelope = reader
            .nested(Payload::KEY, Envelope::from_object)?
            .ok_or_else(|| ValidationError::missing("Payload.openFloor", "an envelope object"))?;
        Ok(Payload::new(envelope))
    }
}
