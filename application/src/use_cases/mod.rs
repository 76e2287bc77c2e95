//! Use cases for the application layer.

pub mod handle_envelope;
