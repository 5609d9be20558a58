//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware / handlers / outbound client
//!     → field.rs (optional setters)
//!     → logger.rs (build Event, serialize)
//!     → sink.rs (stdout, stderr, file, memory)
//!
//! Sink and fallback failures
//!     → logging.rs (tracing diagnostics on stderr)
//! ```
//!
//! # Design Decisions
//! - One JSON object per event, one event per line
//! - Request and response of a transaction share one event
//! - Reference ID flows through every event of a transaction

pub mod event;
pub mod field;
pub mod format;
pub mod logger;
pub mod logging;
pub mod sink;

pub use event::Event;
pub use field::Field;
pub use logger::EventLogger;
pub use sink::{FileSink, MemorySink, Sink, StderrSink, StdoutSink};
