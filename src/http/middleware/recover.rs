//! Top-level failure boundary.
//!
//! Wraps the whole router. Handler panics and [`AppError`](crate::http::response::AppError)
//! responses are logged with the request context and answered with a 500
//! carrying only the reference ID. Everything else passes through untouched.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use futures_util::FutureExt;

use crate::http::context::{request_host, RequestContext};
use crate::http::response::{error_response, UnhandledError};
use crate::observability::format::format_query;
use crate::observability::{field, EventLogger};

pub async fn recover(State(logger): State<EventLogger>, request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_extensions(request.extensions());
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = request.headers().clone();

    let (failure, source) = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => {
            let unhandled = response.extensions().get::<UnhandledError>().cloned();
            match unhandled {
                Some(UnhandledError(message)) => (message, "handler error"),
                None => return response,
            }
        }
        Err(panic) => (panic_message(panic.as_ref()), "panic"),
    };

    logger.log(
        "failed handler",
        [
            field::reference_id(&ctx.reference_id),
            field::user(&ctx.user),
            field::error(&failure),
            field::context([("source", source)]),
            field::request(
                method.as_str(),
                &request_host(&headers, &uri),
                uri.path(),
                format_query(uri.query()),
                &headers,
                &[],
            ),
        ],
    );

    error_response(&ctx.reference_id)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload: Box<dyn Any + Send> = Box::new(format!("index {}", 3));
        assert_eq!(panic_message(payload.as_ref()), "index 3");

        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "handler panicked");
    }
}
