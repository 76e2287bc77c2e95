//! Port definitions (interfaces implemented outside the application layer).
//!
//! - [`envelope_logger::EnvelopeLogger`] - structured envelope trace
//! - [`utterance_responder::UtteranceResponder`] - what a bot says back

pub mod envelope_logger;
pub mod utterance_responder;
