//! Agent settings - application-level knobs for agents and the codec.

use crate::ports::utterance_responder::CannedReply;
use serde::{Deserialize, Serialize};

/// Behavior settings shared by the agent variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Text of the bot's placeholder reply to utterances.
    pub canned_reply: String,
    /// Check inbound payloads against the envelope schema before decoding.
    pub preflight: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            canned_reply: CannedReply::DEFAULT_TEXT.to_string(),
            preflight: true,
        }
    }
}

impl AgentSettings {
    pub fn with_canned_reply(mut self, text: impl Into<String>) -> Self {
        self.canned_reply = text.into();
        self
    }

    pub fn with_preflight(mut self, preflight: bool) -> Self {
        self.preflight = preflight;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AgentSettings::default();
        assert_eq!(settings.canned_reply, CannedReply::DEFAULT_TEXT);
        assert!(settings.preflight);
    }

    #[test]
    fn test_builders() {
        let settings = AgentSettings::default()
            .with_canned_reply("Hi")
            .with_preflight(false);
        assert_eq!(settings.canned_reply, "Hi");
        assert!(!settings.preflight);
    }
}
