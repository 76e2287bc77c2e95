//! Port for structured envelope tracing.
//!
//! Defines the [`EnvelopeLogger`] trait for recording every envelope an agent
//! receives or sends to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the raw
//! envelopes in a machine-readable format (JSONL). It is a debugging aid, not
//! conversation persistence.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Which way an envelope was travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeDirection {
    Inbound,
    Outbound,
}

/// One traced envelope.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeRecord {
    pub direction: EnvelopeDirection,
    pub timestamp: DateTime<Utc>,
    /// Canonical payload mapping (`{"openFloor": ...}`).
    pub envelope: Value,
}

impl EnvelopeRecord {
    /// Create a new record stamped with the current UTC time.
    pub fn new(direction: EnvelopeDirection, envelope: Value) -> Self {
        Self {
            direction,
            timestamp: Utc::now(),
            envelope,
        }
    }
}

/// Port for logging envelopes to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures are
/// ignored so they never disturb envelope processing.
pub trait EnvelopeLogger: Send + Sync {
    fn log(&self, record: EnvelopeRecord);
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoEnvelopeLogger;

impl EnvelopeLogger for NoEnvelopeLogger {
    fn log(&self, _record: EnvelopeRecord) {}
}
