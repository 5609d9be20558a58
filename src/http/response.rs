//! Error responses.
//!
//! # Responsibilities
//! - Render the fixed `{"reference_id": "..."}` 500 body
//! - Turn handler errors into responses the recovery boundary can recognize
//!
//! # Design Decisions
//! - Clients only ever see the reference ID; details stay in the event log
//! - Handlers return [`AppError`] instead of logging themselves, so failures
//!   are logged once, with full request context, by [`recover`](super::middleware::recover)

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::client::ClientError;

/// 500 response carrying only the reference ID.
pub fn error_response(reference_id: &str) -> Response {
    let body = format!(
        r#"{{"reference_id": {}}}"#,
        Value::String(reference_id.to_string())
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

/// Handler failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to decode request body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("downstream call failed: {0}")]
    Downstream(#[from] ClientError),

    #[error("{0}")]
    Internal(String),
}

/// Marker left on responses produced from an [`AppError`].
#[derive(Debug, Clone)]
pub struct UnhandledError(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(UnhandledError(self.to_string()));
        response
    }
}
