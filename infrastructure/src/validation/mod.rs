//! Schema validator selection.
//!
//! The host picks the engine once, at startup, from `[validation]`; agents
//! and the codec only ever see an `Arc<dyn SchemaValidator>`.

#[cfg(feature = "jsonschema")]
mod json_schema;

#[cfg(feature = "jsonschema")]
pub use json_schema::JsonSchemaValidator;

use crate::config::{FileValidationConfig, ValidationEngine};
use openfloor_domain::{SchemaValidator, StructuralValidator};
use std::sync::Arc;
use tracing::debug;

/// Build the validator named by `config.engine`.
///
/// Falls back to the structural validator when the `jsonschema` feature is
/// not compiled in.
pub fn select_validator(config: &FileValidationConfig) -> Arc<dyn SchemaValidator> {
    let validator: Arc<dyn SchemaValidator> = match config.engine {
        ValidationEngine::Structural => Arc::new(StructuralValidator),
        ValidationEngine::Jsonschema => jsonschema_engine(),
    };
    debug!("Using {} schema validator", validator.name());
    validator
}

#[cfg(feature = "jsonschema")]
fn jsonschema_engine() -> Arc<dyn SchemaValidator> {
    Arc::new(JsonSchemaValidator)
}

#[cfg(not(feature = "jsonschema"))]
fn jsonschema_engine() -> Arc<dyn SchemaValidator> {
    tracing::warn!("jsonschema engine requested but not compiled in; using the structural validator");
    Arc::new(StructuralValidator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_by_default() {
        let validator = select_validator(&FileValidationConfig::default());
        assert_eq!(validator.name(), "structural");
    }

    #[test]
    fn test_jsonschema_engine_selection() {
        let config = FileValidationConfig {
            engine: ValidationEngine::Jsonschema,
            ..Default::default()
        };
        let expected = if cfg!(feature = "jsonschema") {
            "jsonschema"
        } else {
            "structural"
        };
        assert_eq!(select_validator(&config).name(), expected);
    }
}
