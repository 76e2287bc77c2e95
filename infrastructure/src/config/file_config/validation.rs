//! Validation settings from TOML (`[validation]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which schema engine checks inbound payloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationEngine {
    /// Built-in structural subset validator
    #[default]
    Structural,
    /// Full JSON Schema engine (needs the `jsonschema` feature)
    Jsonschema,
}

/// Raw validation configuration from TOML
///
/// ```toml
/// [validation]
/// engine = "structural"        # "structural" or "jsonschema"
/// schema_dir = "./schemas"     # override the built-in schema documents
/// preflight = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidationConfig {
    pub engine: ValidationEngine,
    pub schema_dir: Option<PathBuf>,
    /// Check inbound payloads against the envelope schema before decoding
    pub preflight: bool,
}

impl Default for FileValidationConfig {
    fn default() -> Self {
        Self {
            engine: ValidationEngine::Structural,
            schema_dir: None,
            preflight: true,
        }
    }
}
