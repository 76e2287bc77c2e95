//! Protocol settings from TOML (`[protocol]` section)

use openfloor_domain::{Schema, ValidationError};
use serde::{Deserialize, Serialize};

/// Raw protocol configuration from TOML
///
/// ```toml
/// [protocol]
/// version = "1.0.0"
/// url = "https://example.com/schemas/openfloor/1.0.0"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProtocolConfig {
    pub version: String,
    pub url: Option<String>,
}

impl Default for FileProtocolConfig {
    fn default() -> Self {
        Self {
            version: Schema::DEFAULT_VERSION.to_string(),
            url: None,
        }
    }
}

impl FileProtocolConfig {
    pub fn to_schema(&self) -> Result<Schema, ValidationError> {
        Schema::new(self.version.clone(), self.url.clone())
    }
}
