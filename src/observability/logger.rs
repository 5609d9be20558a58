//! Event logger entry point.
//!
//! # Responsibilities
//! - Build an [`Event`] from a message and [`Field`]s
//! - Serialize it to compact JSON
//! - Hand the bytes to the configured [`Sink`] in a single write
//!
//! # Design Decisions
//! - The sink is chosen once at startup and injected; a logger without a sink
//!   is the supported way to turn event logging off
//! - Logging never fails the caller: serialization problems degrade to a
//!   fixed fallback record, sink problems go to the diagnostic log

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::event::Event;
use super::field::Field;
use super::sink::{Sink, StdoutSink};

/// Cheaply clonable handle to the process event sink.
#[derive(Clone)]
pub struct EventLogger {
    sink: Option<Arc<dyn Sink>>,
}

impl EventLogger {
    /// Logger writing to `sink`.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }

    /// Logger that drops every event without serializing it.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Emit one event.
    pub fn log(&self, message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
        let Some(sink) = &self.sink else {
            return;
        };

        let mut event = Event::new(message);
        for field in fields {
            field.apply(&mut event);
        }

        let serialized = serde_json::to_vec(&event);
        write_event(sink.as_ref(), &event, serialized);
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(StdoutSink)
    }
}

impl fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLogger")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn write_event(sink: &dyn Sink, event: &Event, serialized: Result<Vec<u8>, serde_json::Error>) {
    let data = match serialized {
        Ok(data) => data,
        Err(err) => fallback_record(event, &err).into_bytes(),
    };

    if let Err(err) = sink.write(&data) {
        tracing::error!(
            error = %err,
            reference_id = %event.reference_id,
            data = %String::from_utf8_lossy(&data),
            "failed to write event to sink"
        );
    }
}

/// Fixed-shape record used when an event cannot be serialized.
fn fallback_record(event: &Event, err: &serde_json::Error) -> String {
    format!(
        r#"{{"message": "failed to serialize event", "error": {}, "reference_id": {}, "context": {{"event": {}}}}}"#,
        quote(&err.to_string()),
        quote(&event.reference_id),
        quote(&format!("{:?}", event)),
    )
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::field;
    use crate::observability::sink::MemorySink;
    use std::io;

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&self, _data: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_log_writes_one_record() {
        let sink = MemorySink::new();
        let logger = EventLogger::new(sink.clone());

        logger.log(
            "failed db.create_article",
            [field::reference_id("ref-1"), field::user("alice")],
        );

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["message"], "failed db.create_article");
        assert_eq!(events[0]["reference_id"], "ref-1");
        assert_eq!(events[0]["user"], "alice");
        assert!(!sink.lines()[0].contains('\n'));
    }

    #[test]
    fn test_disabled_logger_is_noop() {
        let logger = EventLogger::disabled();
        assert!(!logger.is_enabled());
        logger.log("ignored", [field::error("boom")]);
    }

    #[test]
    fn test_sink_failure_does_not_propagate() {
        let logger = EventLogger::new(FailingSink);
        logger.log("dropped", Vec::<Field>::new());
    }

    #[test]
    fn test_serialization_failure_falls_back() {
        let sink = MemorySink::new();
        let mut event = Event::new("broken");
        event.reference_id = "ref-\"9\"".into();
        let err = serde_json::from_str::<Value>("{").unwrap_err();

        write_event(&sink, &event, Err(err));

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["message"], "failed to serialize event");
        assert_eq!(events[0]["reference_id"], "ref-\"9\"");
        assert!(events[0]["error"].as_str().unwrap().contains("EOF"));
        assert!(events[0]["context"]["event"]
            .as_str()
            .unwrap()
            .contains("broken"));
    }

    #[test]
    fn test_concurrent_logging() {
        let sink = MemorySink::new();
        let logger = EventLogger::new(sink.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        logger.log(format!("event {i}-{j}"), [field::reference_id(i.to_string())]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sink.events().len(), 200);
    }
}
