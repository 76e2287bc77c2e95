//! Infrastructure layer for openfloor
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration file loading, the static schema
//! documents, validator selection and the JSONL envelope trace.

pub mod config;
pub mod host;
pub mod logging;
pub mod schemas;
pub mod validation;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileCapabilityConfig, FileConfig,
    FileLoggingConfig, FileProtocolConfig, FileValidationConfig, ValidationEngine,
};
pub use host::{
    HostError, bot_use_case, codec_from_config, envelope_logger_from_config, open_conversation,
};
pub use logging::{JsonlEnvelopeLogger, init_tracing};
pub use schemas::{SchemaLoadError, SchemaSet};
pub use validation::select_validator;

#[cfg(feature = "jsonschema")]
pub use validation::JsonSchemaValidator;
