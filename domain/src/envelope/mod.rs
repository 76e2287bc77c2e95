//! Envelope subdomain - the wire message and its parts.
//!
//! ```text
//! Payload { openFloor: Envelope }
//!   Envelope
//!   ├── schema        Schema { version, url? }
//!   ├── conversation  Conversation { id, conversants? }
//!   ├── sender        Sender { speakerUri, serviceUrl? }
//!   └── events        [Event { eventType, to?, reason?, parameters? }]
//! ```

pub mod conversation;
pub mod event;
pub mod message;
pub mod reason;
pub mod routing;
pub mod schema;

pub use conversation::{Conversant, Conversation};
pub use event::{Event, EventKind, EventType, RecommendScope};
pub use message::{Envelope, EnvelopeBuilder, EnvelopeOptions, Payload};
pub use routing::{Sender, To};
pub use schema::Schema;
