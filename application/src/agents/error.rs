//! Agent error types

use openfloor_domain::{ProtocolError, ValidationError};
use thiserror::Error;

/// Errors raised while an agent processes an envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The agent is bound to another conversation. No state was changed.
    #[error("Agent is bound to conversation {active} but received an envelope for {received}")]
    ConversationConflict { active: String, received: String },

    #[error("Responder failed: {0}")]
    Responder(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl AgentError {
    /// Check if this error is a conversation conflict
    pub fn is_conversation_conflict(&self) -> bool {
        matches!(self, AgentError::ConversationConflict { .. })
    }
}

impl From<ValidationError> for AgentError {
    fn from(e: ValidationError) -> Self {
        AgentError::Protocol(e.into())
    }
}
