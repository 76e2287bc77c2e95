//! Logging infrastructure.
//!
//! - [`init_tracing`] installs the `tracing` subscriber for a host process
//! - [`JsonlEnvelopeLogger`] writes the envelope trace, implementing the
//!   [`EnvelopeLogger`](openfloor_application::EnvelopeLogger) port

mod jsonl_logger;

pub use jsonl_logger::JsonlEnvelopeLogger;

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count: 0=warn, 1=info, 2=debug, 3+=trace.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a `fmt` subscriber. `RUST_LOG` wins over `verbosity` when set.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
