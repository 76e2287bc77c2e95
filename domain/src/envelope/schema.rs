//! Schema reference carried by every envelope.

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject, require_text};
use serde::Serialize;
use serde_json::Value;

/// Protocol version the envelope was written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl Schema {
    pub const DEFAULT_VERSION: &'static str = "1.0.0";

    pub fn new(version: impl Into<String>, url: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            version: require_text("Schema.version", Some(version.into()), "a version string")?,
            url,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            version: Self::DEFAULT_VERSION.to_string(),
            url: None,
        }
    }
}

impl WireObject for Schema {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Schema", value)?;
        let version = reader
            .string("version")?
            .ok_or_else(|| ValidationError::missing("Schema.version", "a version string"))?;
        Schema::new(version, reader.string("url")?)
    }
}
