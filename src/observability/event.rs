//! Event record model.
//!
//! An [`Event`] is built by [`EventLogger::log`](super::logger::EventLogger::log),
//! populated by [`Field`](super::field::Field) values, serialized once and dropped.
//! Every optional member is skipped when empty so consumers never see `null`
//! or `{}` placeholders.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// One structured log record.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Short description of what happened.
    ///
    /// Failures read `failed <operation>`; HTTP transactions read
    /// `in 'POST localhost:8080/person/bob' 201` or `out 'GET example.org/' 200`.
    pub message: String,

    /// Emission time, RFC3339 UTC with nanoseconds.
    pub timestamp: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub reference_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Short error description, without details.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,

    /// Ad-hoc diagnostic values, already rendered as strings.
    #[serde(skip_serializing_if = "context_is_empty")]
    pub context: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseRecord>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,
}

impl Event {
    /// Start an event stamped with the current time and host.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            reference_id: String::new(),
            user: String::new(),
            error: String::new(),
            context: None,
            request: None,
            response: None,
            hostname: hostname().to_string(),
        }
    }
}

fn context_is_empty(context: &Option<BTreeMap<String, String>>) -> bool {
    context.as_ref().map_or(true, BTreeMap::is_empty)
}

/// Request half of an HTTP transaction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestRecord {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, Vec<String>>,

    /// Repeated header values are joined by `", "`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Response half of an HTTP transaction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseRecord {
    pub status_code: u16,

    /// Repeated header values are joined by `", "`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

static HOSTNAME: OnceLock<String> = OnceLock::new();

/// Host name of this process, resolved on first use. Empty if resolution fails.
pub fn hostname() -> &'static str {
    HOSTNAME.get_or_init(|| {
        ::hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::Value;

    #[test]
    fn test_minimal_event_has_only_required_keys() {
        let mut event = Event::new("succeeded track-job");
        event.hostname.clear();

        let json: Value = serde_json::to_value(&event).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["message"], "succeeded track-job");
        assert!(object.contains_key("timestamp"));
    }

    #[test]
    fn test_timestamp_is_rfc3339_nanos_utc() {
        let event = Event::new("tick");
        assert!(event.timestamp.ends_with('Z'));
        let parsed = DateTime::parse_from_rfc3339(&event.timestamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        // seconds + '.' + 9 fractional digits + 'Z'
        let fraction = event.timestamp.rsplit('.').next().unwrap();
        assert_eq!(fraction.len(), 10);
    }

    #[test]
    fn test_empty_context_never_serialized() {
        let mut event = Event::new("x");
        event.context = Some(BTreeMap::new());
        let json: Value = serde_json::to_value(&event).unwrap();
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_response_status_always_present() {
        let record = ResponseRecord {
            status_code: 0,
            headers: None,
            body: "ok".into(),
        };
        let json: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status_code"], 0);
        assert!(json.get("headers").is_none());
    }

    #[test]
    fn test_hostname_is_stable() {
        assert_eq!(hostname(), hostname());
    }
}
