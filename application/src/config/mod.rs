//! Application-level configuration.
//!
//! - [`AgentSettings`] - canned reply text and inbound preflight switch

pub mod agent_settings;

pub use agent_settings::AgentSettings;
