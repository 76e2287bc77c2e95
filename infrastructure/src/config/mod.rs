//! Configuration file loading for openfloor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OPENFLOOR_` environment variables
//! 2. Explicitly given config file
//! 3. Project root: `./openfloor.toml` or `./.openfloor.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/openfloor/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileCapabilityConfig, FileConfig, FileLoggingConfig,
    FileProtocolConfig, FileValidationConfig, ValidationEngine,
};
pub use loader::ConfigLoader;
