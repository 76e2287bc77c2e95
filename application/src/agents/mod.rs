//! Conversational agents.
//!
//! Every agent implements [`Agent`]: it is handed one inbound envelope at a
//! time and fills an [`EnvelopeBuilder`] that becomes its reply.
//!
//! ```text
//! inbound Envelope
//!        ↓
//! reply_builder (same schema + conversation id, sender = self, no events)
//!        ↓
//! Agent::on_envelope  ── BotAgent:     dispatch events addressed to me
//!        ↓            ── FloorManager: relay everything, grant on request
//! EnvelopeBuilder::build
//!        ↓
//! outbound Envelope
//! ```
//!
//! Callers must serialize calls to one agent instance; agents hold no locks.

pub mod bot;
pub mod convener;
pub mod error;
pub mod floor_manager;

pub use bot::BotAgent;
pub use convener::{Convener, ConvenerAgent};
pub use error::AgentError;
pub use floor_manager::FloorManager;

use async_trait::async_trait;
use openfloor_domain::{Envelope, EnvelopeBuilder, Event, Manifest, Sender};

/// Contract shared by every agent variant.
#[async_trait]
pub trait Agent: Send {
    /// The agent's own identity and capabilities.
    fn manifest(&self) -> &Manifest;

    /// Variant-specific handling of one inbound envelope.
    async fn on_envelope(
        &mut self,
        inbound: &Envelope,
        outbound: &mut EnvelopeBuilder,
    ) -> Result<(), AgentError>;

    /// Sender block for envelopes this agent produces.
    fn sender(&self) -> Result<Sender, AgentError> {
        let manifest = self.manifest();
        Ok(Sender::new(
            manifest.speaker_uri(),
            Some(manifest.service_url().to_string()),
        )?)
    }

    /// Process one inbound envelope into the reply envelope.
    async fn process_envelope(&mut self, inbound: &Envelope) -> Result<Envelope, AgentError> {
        let mut outbound = inbound.reply_builder(self.sender()?);
        self.on_envelope(inbound, &mut outbound).await?;
        Ok(outbound.build())
    }
}

/// An event is for `manifest` when it has no `to`, or `to` names its speaker
/// URI or service URL.
pub fn addressed_to_me(manifest: &Manifest, event: &Event) -> bool {
    event.is_addressed_to(manifest.speaker_uri(), Some(manifest.service_url()))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use openfloor_domain::To;

    #[test]
    fn test_addressed_to_me() {
        let manifest = agent_manifest();
        assert!(addressed_to_me(&manifest, &Event::invite()));
        assert!(addressed_to_me(&manifest, &Event::invite().with_to(To::speaker(AGENT))));
        assert!(addressed_to_me(&manifest, &Event::invite().with_to(To::service(AGENT_URL))));
        assert!(!addressed_to_me(&manifest, &Event::invite().with_to(To::speaker(USER))));
    }
}
