//! Envelope codec - wire text in, value objects out, and back.
//!
//! ```text
//! text ──parse──▶ JSON ──preflight (optional)──▶ Payload::from_object ──▶ Envelope
//! ```
//!
//! Preflight runs the injected [`SchemaValidator`] over the whole payload and
//! reports every defect at once, before any value object is built.

use openfloor_domain::{Envelope, Payload, ProtocolError, SchemaValidator, WireObject};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while decoding wire text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    Parse(String),

    #[error("Payload failed schema validation: {}", .0.join("; "))]
    Schema(Vec<String>),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Turns wire text into envelopes and envelopes into wire text.
#[derive(Clone)]
pub struct EnvelopeCodec {
    preflight: Option<(Arc<dyn SchemaValidator>, Value)>,
}

impl EnvelopeCodec {
    /// Codec without preflight; only value-object validation applies.
    pub fn new() -> Self {
        Self { preflight: None }
    }

    /// Codec that checks payloads against `envelope_schema` first.
    pub fn with_preflight(validator: Arc<dyn SchemaValidator>, envelope_schema: Value) -> Self {
        Self {
            preflight: Some((validator, envelope_schema)),
        }
    }

    pub fn has_preflight(&self) -> bool {
        self.preflight.is_some()
    }

    pub fn decode(&self, text: &str) -> Result<Envelope, DecodeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DecodeError::Parse(e.to_string()))?;

        if let Some((validator, schema)) = &self.preflight {
            let report = validator.validate(&value, schema);
            if !report.valid {
                warn!(
                    validator = validator.name(),
                    errors = report.errors.len(),
                    "Inbound payload failed preflight"
                );
                return Err(DecodeError::Schema(report.errors));
            }
            debug!(validator = validator.name(), "Inbound payload passed preflight");
        }

        Ok(Payload::from_object(&value)?.into_envelope())
    }

    /// Canonical payload JSON for `envelope`.
    pub fn encode(&self, envelope: &Envelope) -> String {
        Payload::new(envelope.clone()).to_json()
    }
}

impl Default for EnvelopeCodec {
    fn default() -> Self {
        Self::new()
    }
}
