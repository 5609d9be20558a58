//! Inbound transaction capture.
//!
//! Logs a handler's request and response as one `in '...'` event.
//!
//! Logging requests and responses pays off mostly for handlers with side
//! effects, so this middleware is attached per route rather than globally.
//!
//! # Data Flow
//! ```text
//! request body → buffered → handler (reads a fresh copy)
//!     → response body buffered → relayed to the caller
//!     → one event with both halves
//! ```

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::context::{request_host, RequestContext};
use crate::http::response::{error_response, UnhandledError};
use crate::observability::format::format_query;
use crate::observability::{field, EventLogger};

pub async fn capture_transaction(
    State(logger): State<EventLogger>,
    request: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::from_extensions(request.extensions());
    let (parts, body) = request.into_parts();

    let method = parts.method.as_str().to_string();
    let host = request_host(&parts.headers, &parts.uri);
    let path = parts.uri.path().to_string();
    let query = format_query(parts.uri.query());
    let request_headers = parts.headers.clone();

    let request_body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            logger.log(
                "failed to read request body",
                [
                    field::reference_id(&ctx.reference_id),
                    field::user(&ctx.user),
                    field::error(&err),
                    field::context([("content_length", declared_length(&request_headers))]),
                    field::request(&method, &host, &path, query, &request_headers, &[]),
                ],
            );
            return error_response(&ctx.reference_id);
        }
    };

    let request = Request::from_parts(parts, Body::from(request_body.clone()));
    let mut response = next.run(request).await;
    // Record the body the boundary will send; the marker stays for `recover`.
    if let Some(unhandled) = response.extensions().get::<UnhandledError>().cloned() {
        response = error_response(&ctx.reference_id);
        response.extensions_mut().insert(unhandled);
    }

    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    let response_body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            logger.log(
                "failed to read response body",
                [
                    field::reference_id(&ctx.reference_id),
                    field::user(&ctx.user),
                    field::error(&err),
                    field::context([("content_length", declared_length(&parts.headers))]),
                    field::request(&method, &host, &path, query, &request_headers, &request_body),
                    field::response(status, &parts.headers, &[]),
                ],
            );
            return error_response(&ctx.reference_id);
        }
    };

    logger.log(
        format!("in '{} {}{}' {}", method, host, path, status),
        [
            field::reference_id(&ctx.reference_id),
            field::user(&ctx.user),
            field::request(&method, &host, &path, query, &request_headers, &request_body),
            field::response(status, &parts.headers, &response_body),
        ],
    );

    Response::from_parts(parts, Body::from(response_body))
}

/// `Content-Length` as announced by the sender, `unknown` for chunked bodies.
fn declared_length(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
