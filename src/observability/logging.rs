//! Diagnostic logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber used for operational messages
//! - Carry sink failures and lifecycle messages, separate from the event log
//!
//! # Design Decisions
//! - Diagnostic output goes to stderr so stdout stays a clean event stream
//! - Level configurable via `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "http_event_log=info,tower_http=info";

/// Install the global diagnostic subscriber. Later calls are ignored.
pub fn init_diagnostics() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
