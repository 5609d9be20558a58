//! Optional event fields.
//!
//! Each constructor returns a [`Field`] that sets one part of an [`Event`].
//! Fields are applied in the order given to
//! [`EventLogger::log`](super::logger::EventLogger::log); a later field for the
//! same member overwrites an earlier one.
//!
//! ```ignore
//! logger.log("failed db.create_article", [
//!     field::reference_id(&ctx.reference_id),
//!     field::error(&err),
//!     field::context([("article_id", id.to_string())]),
//! ]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use axum::http::HeaderMap;

use super::event::{Event, RequestRecord, ResponseRecord};
use super::format::{format_body, format_headers};

/// A single field setter.
#[derive(Debug, Clone)]
pub struct Field(Setter);

#[derive(Debug, Clone)]
enum Setter {
    ReferenceId(String),
    User(String),
    Error(String),
    Context(BTreeMap<String, String>),
    Request(RequestRecord),
    Response(ResponseRecord),
    /// Composite field given entirely empty input.
    Nothing,
}

impl Field {
    pub(crate) fn apply(self, event: &mut Event) {
        match self.0 {
            Setter::ReferenceId(id) => event.reference_id = id,
            Setter::User(user) => event.user = user,
            Setter::Error(error) => event.error = error,
            Setter::Context(context) => event.context = Some(context),
            Setter::Request(request) => event.request = Some(request),
            Setter::Response(response) => event.response = Some(response),
            Setter::Nothing => {}
        }
    }
}

pub fn reference_id(id: impl Into<String>) -> Field {
    Field(Setter::ReferenceId(id.into()))
}

pub fn user(user: impl Into<String>) -> Field {
    Field(Setter::User(user.into()))
}

/// Record the display form of an error.
pub fn error<E: fmt::Display + ?Sized>(err: &E) -> Field {
    Field(Setter::Error(err.to_string()))
}

/// Attach string-rendered diagnostic values. An empty mapping is never serialized.
pub fn context<I, K, V>(entries: I) -> Field
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let context = entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Field(Setter::Context(context))
}

/// Attach the request half of a transaction.
///
/// Leaves the event untouched when every argument is empty.
pub fn request(
    method: &str,
    host: &str,
    path: &str,
    query: BTreeMap<String, Vec<String>>,
    headers: &HeaderMap,
    body: &[u8],
) -> Field {
    if method.is_empty()
        && host.is_empty()
        && path.is_empty()
        && query.is_empty()
        && headers.is_empty()
        && body.is_empty()
    {
        return Field(Setter::Nothing);
    }

    Field(Setter::Request(RequestRecord {
        method: method.to_string(),
        host: host.to_string(),
        path: path.to_string(),
        query,
        headers: format_headers(headers),
        body: format_body(body),
    }))
}

/// Attach the response half of a transaction.
///
/// Leaves the event untouched when the status is zero and headers and body are empty.
pub fn response(status_code: u16, headers: &HeaderMap, body: &[u8]) -> Field {
    if status_code == 0 && headers.is_empty() && body.is_empty() {
        return Field(Setter::Nothing);
    }

    Field(Setter::Response(ResponseRecord {
        status_code,
        headers: format_headers(headers),
        body: format_body(body),
    }))
}
