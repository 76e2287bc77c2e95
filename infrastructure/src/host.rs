//! Wiring of configured adapters into application use cases.
//!
//! ```text
//! FileConfig ─┬─ [validation] ─▶ select_validator + SchemaSet ─▶ EnvelopeCodec
//!             ├─ [logging]    ─▶ JsonlEnvelopeLogger | NoEnvelopeLogger
//!             ├─ [agent]      ─▶ Manifest + AgentSettings ─▶ BotAgent
//!             │                                                ↓
//!             │                                    HandleEnvelopeUseCase
//!             └─ [protocol]   ─▶ Schema ─▶ open_conversation (originated envelopes)
//! ```

use crate::config::{ConfigValidationError, FileConfig, FileLoggingConfig};
use crate::logging::JsonlEnvelopeLogger;
use crate::schemas::{SchemaLoadError, SchemaSet};
use crate::validation::select_validator;
use openfloor_application::{
    BotAgent, EnvelopeCodec, EnvelopeLogger, HandleEnvelopeUseCase, NoEnvelopeLogger,
};
use openfloor_domain::{Conversation, Envelope, EnvelopeBuilder, Sender, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while wiring a host from configuration.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Invalid configuration: {}", join(.0))]
    Config(Vec<ConfigValidationError>),

    #[error("Invalid agent manifest: {0}")]
    Manifest(#[from] ValidationError),

    #[error(transparent)]
    Schema(#[from] SchemaLoadError),

    #[error("Cannot open envelope: {0}")]
    Envelope(ValidationError),
}

fn join(issues: &[ConfigValidationError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Codec with preflight against the configured envelope schema, if enabled.
pub fn codec_from_config(config: &FileConfig) -> Result<EnvelopeCodec, SchemaLoadError> {
    if !config.validation.preflight {
        return Ok(EnvelopeCodec::new());
    }
    let schemas = SchemaSet::from_config(&config.validation)?;
    Ok(EnvelopeCodec::with_preflight(
        select_validator(&config.validation),
        schemas.envelope().clone(),
    ))
}

/// JSONL trace when `envelope_log` is set and writable, no-op otherwise.
pub fn envelope_logger_from_config(config: &FileLoggingConfig) -> Arc<dyn EnvelopeLogger> {
    config
        .envelope_log
        .as_ref()
        .and_then(JsonlEnvelopeLogger::new)
        .map(|logger| {
            info!("Tracing envelopes to {}", logger.path().display());
            Arc::new(logger) as Arc<dyn EnvelopeLogger>
        })
        .unwrap_or_else(|| Arc::new(NoEnvelopeLogger))
}

/// A bot agent use case built entirely from configuration.
pub fn bot_use_case(config: &FileConfig) -> Result<HandleEnvelopeUseCase<BotAgent>, HostError> {
    let issues = config.validate();
    if !issues.is_empty() {
        return Err(HostError::Config(issues));
    }

    let manifest = config.to_manifest()?;
    info!(
        speaker_uri = manifest.speaker_uri(),
        "Starting bot agent {}",
        manifest.identification().conversational_name()
    );
    let bot = BotAgent::from_settings(manifest, &config.agent_settings());

    Ok(HandleEnvelopeUseCase::new(bot, codec_from_config(config)?)
        .with_envelope_logger(envelope_logger_from_config(&config.logging)))
}

/// Skeleton for an envelope this agent originates rather than answers, such
/// as a convener opening a conversation with invitations.
///
/// The schema block comes from `[protocol]`; the sender from `[agent]`.
pub fn open_conversation(
    config: &FileConfig,
    conversation_id: &str,
) -> Result<EnvelopeBuilder, HostError> {
    let schema = config.to_schema().map_err(HostError::Envelope)?;
    let manifest = config.to_manifest()?;
    let sender = Sender::new(manifest.speaker_uri(), Some(manifest.service_url().to_string()))?;
    let conversation = Conversation::new(conversation_id, Vec::new()).map_err(HostError::Envelope)?;
    Ok(Envelope::builder(schema, conversation, sender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileAgentConfig, FileCapabilityConfig, FileValidationConfig};
    use openfloor_application::{Convener, ConvenerAgent};
    use openfloor_domain::validation::validate;
    use openfloor_domain::{Payload, WireObject};
    use serde_json::{Value, json};

    const AGENT: &str = "tag:weather.example.com,2025:agent";

    fn config() -> FileConfig {
        FileConfig {
            agent: FileAgentConfig {
                speaker_uri: AGENT.into(),
                service_url: "https://weather.example.com/ofp".into(),
                organization: "Example Weather".into(),
                conversational_name: "Stormy".into(),
                synopsis: "Weather forecasts".into(),
                capabilities: vec![FileCapabilityConfig {
                    keyphrases: vec!["weather".into()],
                    descriptions: vec!["Provides forecasts".into()],
                    ..Default::default()
                }],
                canned_reply: "Sunny.".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_codec_preflight_follows_config() {
        assert!(codec_from_config(&config()).unwrap().has_preflight());

        let mut config = config();
        config.validation = FileValidationConfig {
            preflight: false,
            ..Default::default()
        };
        assert!(!codec_from_config(&config).unwrap().has_preflight());
    }

    #[test]
    fn test_invalid_config_refused() {
        let err = bot_use_case(&FileConfig::default()).err().unwrap();
        assert!(matches!(err, HostError::Config(ref issues) if issues.len() == 5));
        assert!(err.to_string().contains("agent.speaker_uri cannot be empty"));
    }

    #[tokio::test]
    async fn test_configured_bot_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("envelopes.jsonl");
        let mut config = config();
        config.logging.envelope_log = Some(log.clone());

        let use_case = bot_use_case(&config).unwrap();
        let inbound = json!({
            "openFloor": {
                "schema": {"version": "1.0.0"},
                "conversation": {"id": "conv-1"},
                "sender": {"speakerUri": "tag:example.com,2025:user-1"},
                "events": [{
                    "eventType": "utterance",
                    "parameters": {
                        "dialogEvent": {
                            "id": "de-1",
                            "speakerUri": "tag:example.com,2025:user-1",
                            "span": {"startTime": "2025-03-01T10:00:00Z"},
                            "features": {
                                "text": {"mimeType": "text/plain", "tokens": [{"value": "Forecast?"}]}
                            }
                        }
                    }
                }]
            }
        });

        let reply = use_case.execute(&inbound.to_string()).await.unwrap();
        let reply: Value = serde_json::from_str(&reply).unwrap();
        let features = &reply["openFloor"]["events"][0]["parameters"]["dialogEvent"]["features"];
        assert_eq!(features["text"]["tokens"][0]["value"], "Sunny.");
        drop(use_case);

        let lines = std::fs::read_to_string(&log).unwrap();
        assert_eq!(lines.lines().count(), 2);
    }

    #[test]
    fn test_open_conversation_uses_protocol_settings() {
        let mut config = config();
        config.protocol.url = Some("https://example.com/schemas/openfloor/1.0.0".into());

        let mut builder = open_conversation(&config, "conv-9").unwrap();
        builder.push_event(
            ConvenerAgent::new(config.to_manifest().unwrap())
                .invite_agent("https://news.example.com/ofp", None, None)
                .unwrap(),
        );
        let envelope = builder.build();

        assert_eq!(envelope.schema().version(), "1.0.0");
        assert_eq!(
            envelope.schema().url(),
            Some("https://example.com/schemas/openfloor/1.0.0")
        );
        assert_eq!(envelope.sender().speaker_uri(), AGENT);
        assert_eq!(envelope.conversation().id(), "conv-9");

        let payload = Payload::new(envelope).to_object();
        let report = validate(&payload, SchemaSet::builtin().unwrap().envelope());
        assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn test_blank_protocol_version_only_blocks_originated_envelopes() {
        let mut config = config();
        config.protocol.version = "  ".into();

        assert!(config.validate().is_empty());
        assert!(bot_use_case(&config).is_ok());
        let err = open_conversation(&config, "conv-9").err().unwrap();
        assert!(matches!(err, HostError::Envelope(ref e) if e.field == "Schema.version"));
    }

    #[tokio::test]
    async fn test_preflight_rejects_before_agent() {
        let use_case = bot_use_case(&config()).unwrap();
        let err = use_case
            .execute(r#"{"openFloor": {"schema": {"version": "1.0.0"}}}"#)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("schema validation"));
    }
}
