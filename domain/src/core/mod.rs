//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ValidationError`] - a value object rejected its input
//! - [`error::ProtocolError`] - decoding/factory failures
//! - [`object::WireObject`] - canonical JSON projection

pub mod error;
pub mod object;
