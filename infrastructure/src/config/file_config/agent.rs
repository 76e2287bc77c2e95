//! Agent identity from TOML (`[agent]` section)

use openfloor_domain::{
    Capability, CapabilityOptions, Identification, IdentificationOptions, Manifest,
    SupportedLayers, ValidationError,
};
use openfloor_application::CannedReply;
use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// speaker_uri = "tag:weather.example.com,2025:agent"
/// service_url = "https://weather.example.com/ofp"
/// organization = "Example Weather"
/// conversational_name = "Stormy"
/// synopsis = "Weather forecasts for any city"
/// canned_reply = "Let me check the sky."
///
/// [[agent.capabilities]]
/// keyphrases = ["weather", "forecast"]
/// descriptions = ["Provides weather forecasts"]
/// languages = ["en-us"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub speaker_uri: String,
    pub service_url: String,
    pub organization: String,
    pub conversational_name: String,
    pub synopsis: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub capabilities: Vec<FileCapabilityConfig>,
    /// Text of the placeholder reply to utterances
    pub canned_reply: String,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            speaker_uri: String::new(),
            service_url: String::new(),
            organization: String::new(),
            conversational_name: String::new(),
            synopsis: String::new(),
            department: None,
            role: None,
            capabilities: Vec::new(),
            canned_reply: CannedReply::DEFAULT_TEXT.to_string(),
        }
    }
}

impl FileAgentConfig {
    /// Build the agent manifest through the validating constructors.
    pub fn to_manifest(&self) -> Result<Manifest, ValidationError> {
        let identification = Identification::new(IdentificationOptions {
            speaker_uri: Some(self.speaker_uri.clone()),
            service_url: Some(self.service_url.clone()),
            organization: Some(self.organization.clone()),
            conversational_name: Some(self.conversational_name.clone()),
            department: self.department.clone(),
            role: self.role.clone(),
            synopsis: Some(self.synopsis.clone()),
        })?;
        let capabilities = self
            .capabilities
            .iter()
            .map(FileCapabilityConfig::to_capability)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Manifest::new(identification, capabilities))
    }
}

/// One `[[agent.capabilities]]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCapabilityConfig {
    pub keyphrases: Vec<String>,
    pub descriptions: Vec<String>,
    pub languages: Option<Vec<String>>,
    /// Defaults to `["text"]`
    pub input_layers: Option<Vec<String>>,
    /// Defaults to `["text"]`
    pub output_layers: Option<Vec<String>>,
}

impl FileCapabilityConfig {
    pub fn to_capability(&self) -> Result<Capability, ValidationError> {
        let defaults = SupportedLayers::default();
        Capability::new(CapabilityOptions {
            keyphrases: self.keyphrases.clone(),
            descriptions: self.descriptions.clone(),
            languages: self.languages.clone(),
            supported_layers: Some(SupportedLayers {
                input: self.input_layers.clone().unwrap_or(defaults.input),
                output: self.output_layers.clone().unwrap_or(defaults.output),
            }),
        })
    }
}
