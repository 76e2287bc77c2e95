//! Handle Envelope use case.
//!
//! Drives one agent over wire text: decode, trace, process, trace, encode.
//!
//! ```text
//! text ─▶ EnvelopeCodec::decode ─▶ EnvelopeLogger (inbound)
//!                                        ↓
//!                              Agent::process_envelope
//!                                        ↓
//!        EnvelopeCodec::encode ◀─ EnvelopeLogger (outbound)
//! ```
//!
//! The agent sits behind a [`tokio::sync::Mutex`], so calls sharing one use
//! case are serialized the way a single agent instance requires.

use crate::agents::{Agent, AgentError};
use crate::codec::{DecodeError, EnvelopeCodec};
use crate::ports::envelope_logger::{
    EnvelopeDirection, EnvelopeLogger, EnvelopeRecord, NoEnvelopeLogger,
};
use openfloor_domain::{Envelope, Payload, WireObject};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors that can occur while handling an envelope.
#[derive(Error, Debug)]
pub enum HandleEnvelopeError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),
}

/// Use case for feeding wire envelopes through an agent.
pub struct HandleEnvelopeUseCase<A: Agent> {
    agent: Arc<Mutex<A>>,
    codec: EnvelopeCodec,
    envelope_logger: Arc<dyn EnvelopeLogger>,
}

impl<A: Agent> Clone for HandleEnvelopeUseCase<A> {
    fn clone(&self) -> Self {
        Self {
            agent: self.agent.clone(),
            codec: self.codec.clone(),
            envelope_logger: self.envelope_logger.clone(),
        }
    }
}

impl<A: Agent> HandleEnvelopeUseCase<A> {
    pub fn new(agent: A, codec: EnvelopeCodec) -> Self {
        Self {
            agent: Arc::new(Mutex::new(agent)),
            codec,
            envelope_logger: Arc::new(NoEnvelopeLogger),
        }
    }

    /// Create with an envelope logger.
    pub fn with_envelope_logger(mut self, logger: Arc<dyn EnvelopeLogger>) -> Self {
        self.envelope_logger = logger;
        self
    }

    /// Shared handle to the agent, for inspection or administration.
    pub fn agent(&self) -> Arc<Mutex<A>> {
        self.agent.clone()
    }

    /// Process an already-decoded envelope.
    pub async fn handle(&self, inbound: &Envelope) -> Result<Envelope, AgentError> {
        self.trace(EnvelopeDirection::Inbound, inbound);

        let outbound = {
            let mut agent = self.agent.lock().await;
            agent.process_envelope(inbound).await?
        };

        debug!(
            conversation_id = outbound.conversation().id(),
            events = outbound.events().len(),
            "Envelope processed"
        );
        self.trace(EnvelopeDirection::Outbound, &outbound);
        Ok(outbound)
    }

    /// Decode `text`, process it and encode the reply.
    pub async fn execute(&self, text: &str) -> Result<String, HandleEnvelopeError> {
        let inbound = self.codec.decode(text)?;
        info!(
            conversation_id = inbound.conversation().id(),
            sender = inbound.sender().speaker_uri(),
            events = inbound.events().len(),
            "Handling envelope"
        );
        let outbound = self.handle(&inbound).await?;
        Ok(self.codec.encode(&outbound))
    }

    fn trace(&self, direction: EnvelopeDirection, envelope: &Envelope) {
        let payload = Payload::new(envelope.clone()).to_object();
        self.envelope_logger
            .log(EnvelopeRecord::new(direction, payload));
    }
}
