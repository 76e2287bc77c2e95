//! Convener capability - building floor directives and invitations.
//!
//! [`Convener`] methods only construct events; they change no state. The
//! transitions happen later, when a [`BotAgent`] or [`FloorManager`](super::FloorManager)
//! processes the envelope carrying them.

use super::{Agent, AgentError, BotAgent};
use async_trait::async_trait;
use openfloor_domain::{Envelope, EnvelopeBuilder, Event, Manifest, To, ValidationError};
use serde_json::Value;

/// Pure constructors for privileged events.
pub trait Convener {
    fn grant_floor(&self, to: To, reason: Option<&str>) -> Event {
        with_reason(Event::grant_floor().with_to(to), reason)
    }

    fn revoke_floor(&self, to: To, reason: Option<&str>) -> Event {
        with_reason(Event::revoke_floor().with_to(to), reason)
    }

    fn uninvite_agent(&self, to: To, reason: Option<&str>) -> Event {
        with_reason(Event::uninvite().with_to(to), reason)
    }

    /// Invite the agent served at `service_url`.
    fn invite_agent(
        &self,
        service_url: &str,
        speaker_uri: Option<&str>,
        reason: Option<&str>,
    ) -> Result<Event, ValidationError> {
        if service_url.trim().is_empty() {
            return Err(ValidationError::new(
                "To.serviceUrl",
                Value::String(service_url.to_string()),
                "a non-empty service URL",
            ));
        }
        let to = To::new(
            speaker_uri.map(str::to_string),
            Some(service_url.to_string()),
            false,
        )?;
        Ok(with_reason(Event::invite().with_to(to), reason))
    }
}

fn with_reason(event: Event, reason: Option<&str>) -> Event {
    match reason {
        Some(reason) => event.with_reason(reason),
        None => event,
    }
}

/// A bot that may also convene other agents.
pub struct ConvenerAgent {
    bot: BotAgent,
}

impl ConvenerAgent {
    pub fn new(manifest: Manifest) -> Self {
        Self::from_bot(BotAgent::new(manifest))
    }

    pub fn from_bot(bot: BotAgent) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &BotAgent {
        &self.bot
    }
}

impl Convener for ConvenerAgent {}

#[async_trait]
impl Agent for ConvenerAgent {
    fn manifest(&self) -> &Manifest {
        self.bot.manifest()
    }

    async fn on_envelope(
        &mut self,
        inbound: &Envelope,
        outbound: &mut EnvelopeBuilder,
    ) -> Result<(), AgentError> {
        self.bot.on_envelope(inbound, outbound).await
    }
}
