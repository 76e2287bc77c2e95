//! Schema validation - checking raw JSON against a schema document.
//!
//! [`SchemaValidator`] is the strategy seam: the domain ships
//! [`StructuralValidator`], and infrastructure may plug in a full JSON
//! Schema engine behind the same trait.

pub mod structural;

pub use structural::{StructuralValidator, validate};

use serde::Serialize;
use serde_json::Value;

/// Outcome of a validation run.
///
/// `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates a JSON value against a schema document.
pub trait SchemaValidator: Send + Sync {
    /// Short engine name, used in logs and configuration.
    fn name(&self) -> &'static str;

    fn validate(&self, data: &Value, schema: &Value) -> ValidationReport;
}
