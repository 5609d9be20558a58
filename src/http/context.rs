//! Request-scoped values shared by middleware, handlers and the event logger.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, Extensions, HeaderMap, Uri};
use uuid::Uuid;

/// Header carrying the correlation ID in both directions.
pub const REFERENCE_ID_HEADER: &str = "reference-id";

/// Correlation ID and acting user of the current request.
///
/// Missing values read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub reference_id: String,
    pub user: String,
}

impl RequestContext {
    pub fn new(reference_id: impl Into<String>) -> Self {
        Self {
            reference_id: reference_id.into(),
            user: String::new(),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Read the context stored on a request, or an empty one.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<RequestContext>().cloned().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

/// Host the request was addressed to: the `Host` header, else the URI authority.
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default()
}

const ALPHABET: &[u8; 57] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const SHORT_ID_LEN: usize = 22;

/// Generate a short, URL-safe unique identifier.
///
/// A random UUID written in base 57, always 22 characters.
pub fn new_reference_id() -> String {
    encode_short(Uuid::new_v4().as_u128())
}

fn encode_short(mut value: u128) -> String {
    let base = ALPHABET.len() as u128;
    let mut digits = [ALPHABET[0]; SHORT_ID_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % base) as usize];
        value /= base;
    }
    digits.iter().map(|&b| b as char).collect()
}
