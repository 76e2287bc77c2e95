//! Adapter for the `jsonschema` crate behind the [`SchemaValidator`] port.

use openfloor_domain::{SchemaValidator, ValidationReport};
use serde_json::Value;
use tracing::warn;

/// Full JSON Schema engine. Covers `$ref`, `oneOf`, `format` and the rest
/// of the keywords the structural validator skips.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn name(&self) -> &'static str {
        "jsonschema"
    }

    fn validate(&self, data: &Value, schema: &Value) -> ValidationReport {
        // The bundled documents carry no `$schema`, so pin the draft.
        let validator = match jsonschema::draft202012::new(schema) {
            Ok(validator) => validator,
            Err(e) => {
                warn!("Schema document could not be compiled: {}", e);
                return ValidationReport::from_errors(vec![format!("root: invalid schema: {}", e)]);
            }
        };

        let errors = validator
            .iter_errors(data)
            .map(|e| e.to_string())
            .collect();
        ValidationReport::from_errors(errors)
    }
}
