//! Domain layer for openfloor
//!
//! This crate contains the Open Floor protocol value objects and the pure
//! logic around them. It has no dependencies on infrastructure concerns.
//!
//! # Core Concepts
//!
//! ## Envelope
//!
//! The unit of exchange between conversants:
//!
//! - **Schema / Conversation / Sender**: the envelope header
//! - **Events**: an ordered list of tagged actions (utterance, invite, grantFloor, ...)
//!
//! ## Dialog
//!
//! What a speaker actually says: a [`DialogEvent`] carrying named features
//! made of tokens.
//!
//! ## Manifest
//!
//! How a conversant describes itself: identification plus capabilities.
//!
//! ## Validation
//!
//! Raw JSON is checked against schema documents through the
//! [`SchemaValidator`] strategy before it is turned into value objects.

pub mod core;
pub mod dialog;
pub mod envelope;
pub mod floor;
pub mod manifest;
pub mod util;
pub mod validation;

// Re-export commonly used types
pub use core::{
    error::{ProtocolError, ValidationError},
    object::WireObject,
};
pub use dialog::{
    DialogEvent, DialogEventOptions, Feature, FeatureOptions, Span, SpanOptions, TextFeature,
    Token, TokenOptions,
};
pub use envelope::{
    Conversant, Conversation, Envelope, EnvelopeBuilder, EnvelopeOptions, Event, EventKind,
    EventType, Payload, RecommendScope, Schema, Sender, To, reason,
};
pub use floor::FloorLedger;
pub use manifest::{
    Capability, CapabilityOptions, Identification, IdentificationOptions, Manifest,
    SupportedLayers,
};
pub use validation::{SchemaValidator, StructuralValidator, ValidationReport};
