//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every field
//! has a default, so an empty file is a valid configuration.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{EventLogger, FileSink, StderrSink, StdoutSink};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where structured events are written.
    pub event_log: EventLogConfig,

    /// Downstream service called by the demo handlers.
    pub downstream: DownstreamConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Event sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    Stderr,
    File,
    /// Drop all events.
    Disabled,
}

/// Event log configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EventLogConfig {
    pub sink: SinkKind,

    /// Target file when `sink = "file"`.
    pub file_path: String,
}

impl EventLogConfig {
    /// Build the process event logger. Called once at startup.
    pub fn build_logger(&self) -> io::Result<EventLogger> {
        let logger = match self.sink {
            SinkKind::Stdout => EventLogger::new(StdoutSink),
            SinkKind::Stderr => EventLogger::new(StderrSink),
            SinkKind::File => EventLogger::new(FileSink::open(Path::new(&self.file_path))?),
            SinkKind::Disabled => EventLogger::disabled(),
        };
        Ok(logger)
    }
}

/// Downstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// URL requested by `POST /person/{name}`.
    pub url: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://example.org".to_string(),
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.event_log.sink, SinkKind::Stdout);
        assert_eq!(config.downstream.url, "http://example.org");
        assert_eq!(config.downstream.timeout_secs, 5);
    }

    #[test]
    fn test_parse_full_config() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [event_log]
            sink = "file"
            file_path = "/var/log/events.log"

            [downstream]
            url = "http://localhost:3000/status"
            timeout_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.event_log.sink, SinkKind::File);
        assert_eq!(config.event_log.file_path, "/var/log/events.log");
        assert_eq!(config.downstream.timeout_secs, 2);
    }

    #[test]
    fn test_disabled_sink_builds_noop_logger() {
        let config = EventLogConfig {
            sink: SinkKind::Disabled,
            file_path: String::new(),
        };
        assert!(!config.build_logger().unwrap().is_enabled());
    }
}
