//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and application
//! types on demand.

mod agent;
mod logging;
mod protocol;
mod validation;

pub use agent::{FileAgentConfig, FileCapabilityConfig};
pub use logging::FileLoggingConfig;
pub use protocol::FileProtocolConfig;
pub use validation::{FileValidationConfig, ValidationEngine};

use openfloor_application::AgentSettings;
use openfloor_domain::{Manifest, Schema, ValidationError, util::is_uri};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("agent.{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("agent.speaker_uri must be a URI (scheme:rest), got '{0}'")]
    InvalidSpeakerUri(String),

    #[error("agent.capabilities[{index}]: {reason}")]
    InvalidCapability { index: usize, reason: String },

    #[error("validation.engine = \"jsonschema\" requires the `jsonschema` feature")]
    EngineUnavailable,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agent identity and capabilities
    pub agent: FileAgentConfig,
    /// Protocol schema version
    pub protocol: FileProtocolConfig,
    /// Inbound payload validation
    pub validation: FileValidationConfig,
    /// Envelope trace settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        let agent = &self.agent;

        for (name, value) in [
            ("speaker_uri", &agent.speaker_uri),
            ("service_url", &agent.service_url),
            ("organization", &agent.organization),
            ("conversational_name", &agent.conversational_name),
            ("synopsis", &agent.synopsis),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyField(name));
            }
        }
        if !agent.speaker_uri.trim().is_empty() && !is_uri(&agent.speaker_uri) {
            issues.push(ConfigValidationError::InvalidSpeakerUri(
                agent.speaker_uri.clone(),
            ));
        }

        for (index, capability) in agent.capabilities.iter().enumerate() {
            if let Err(e) = capability.to_capability() {
                issues.push(ConfigValidationError::InvalidCapability {
                    index,
                    reason: e.to_string(),
                });
            }
        }

        if self.validation.engine == ValidationEngine::Jsonschema && !cfg!(feature = "jsonschema")
        {
            issues.push(ConfigValidationError::EngineUnavailable);
        }

        issues
    }

    /// The agent's manifest, built through the validating constructors.
    pub fn to_manifest(&self) -> Result<Manifest, ValidationError> {
        self.agent.to_manifest()
    }

    /// Schema block for envelopes this agent originates. Replies reuse the
    /// inbound schema instead.
    pub fn to_schema(&self) -> Result<Schema, ValidationError> {
        self.protocol.to_schema()
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings::default()
            .with_canned_reply(self.agent.canned_reply.clone())
            .with_preflight(self.validation.preflight)
    }
}
