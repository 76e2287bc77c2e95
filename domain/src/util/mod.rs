//! Shared utility functions.

pub mod duration;
pub mod id;
pub mod json_path;

pub use duration::{DurationError, milliseconds_to_iso_duration, parse_iso_duration};
pub use id::{is_uri, new_uuid};
pub use json_path::JsonPathError;
