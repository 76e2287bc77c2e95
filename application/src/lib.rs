//! Application layer for openfloor
//!
//! This crate contains the agents, port definitions, the envelope codec and
//! application configuration. It depends only on the domain layer.

pub mod agents;
pub mod codec;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{
    Agent, AgentError, BotAgent, Convener, ConvenerAgent, FloorManager, addressed_to_me,
};
pub use codec::{DecodeError, EnvelopeCodec};
pub use config::AgentSettings;
pub use ports::{
    envelope_logger::{EnvelopeDirection, EnvelopeLogger, EnvelopeRecord, NoEnvelopeLogger},
    utterance_responder::{CannedReply, UtteranceResponder},
};
pub use use_cases::handle_envelope::{HandleEnvelopeError, HandleEnvelopeUseCase};
