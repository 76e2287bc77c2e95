//! Port for producing a bot's reply to an utterance.
//!
//! [`BotAgent`](crate::agents::BotAgent) delegates the content of its reply
//! here; this is the override point for real conversational behavior. The
//! built-in [`CannedReply`] answers every utterance with the same text.

use crate::agents::AgentError;
use async_trait::async_trait;
use openfloor_domain::{DialogEvent, Event, Manifest};

/// Produces the reply to one inbound utterance.
#[async_trait]
pub trait UtteranceResponder: Send + Sync {
    /// Build the reply spoken by `speaker`.
    ///
    /// `context` holds the `context` events received earlier in the same
    /// inbound envelope.
    async fn respond(
        &self,
        speaker: &Manifest,
        utterance: &DialogEvent,
        context: &[Event],
    ) -> Result<DialogEvent, AgentError>;
}

/// Always answers with a fixed text.
#[derive(Debug, Clone)]
pub struct CannedReply {
    text: String,
}

impl CannedReply {
    pub const DEFAULT_TEXT: &'static str = "I'm sorry, I can't help with that yet.";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for CannedReply {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEXT)
    }
}

#[async_trait]
impl UtteranceResponder for CannedReply {
    async fn respond(
        &self,
        speaker: &Manifest,
        _utterance: &DialogEvent,
        _context: &[Event],
    ) -> Result<DialogEvent, AgentError> {
        Ok(DialogEvent::text(speaker.speaker_uri(), self.text.clone())?)
    }
}
