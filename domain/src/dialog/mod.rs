//! Dialog subdomain - utterance content.
//!
//! A [`DialogEvent`] is a speaker's contribution, made of named
//! [`Feature`]s (text, ssml, ...), each an ordered list of [`Token`]s that
//! may be timed with a [`Span`].

pub mod dialog_event;
pub mod feature;
pub mod span;
pub mod token;

pub use dialog_event::{DialogEvent, DialogEventOptions};
pub use feature::{Feature, FeatureOptions, TextFeature};
pub use span::{Span, SpanOptions};
pub use token::{Token, TokenOptions};
