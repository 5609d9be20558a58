//! HTTP service with structured JSON event logging.
//!
//! Every inbound transaction handled by a captured route, every outbound call
//! and every handler failure becomes one JSON event on the configured sink.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::{field, EventLogger};
