//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → event logger and server built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the event sink is never swapped while serving
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{DownstreamConfig, EventLogConfig, ListenerConfig, ServiceConfig, SinkKind};
