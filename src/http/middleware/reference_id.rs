//! Reference ID assignment.
//!
//! Honors an incoming `Reference-ID` header, otherwise generates one.
//! The ID is stored in the request's [`RequestContext`] and echoed on the
//! response, including error responses produced further down the stack.

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::context::{new_reference_id, RequestContext, REFERENCE_ID_HEADER};

/// Layer that applies [`ReferenceIdService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceIdLayer;

impl<S> Layer<S> for ReferenceIdLayer {
    type Service = ReferenceIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ReferenceIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for ReferenceIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let reference_id = req
            .headers()
            .get(REFERENCE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(new_reference_id);

        let echoed = HeaderValue::from_str(&reference_id).ok();

        // Keep a user set by an outer layer.
        let mut ctx = RequestContext::from_extensions(req.extensions());
        ctx.reference_id = reference_id;
        req.extensions_mut().insert(ctx);

        let future = self.inner.call(req);
        Box::pin(async move {
            let mut response = future.await?;
            if let Some(value) = echoed {
                response.headers_mut().insert(REFERENCE_ID_HEADER, value);
            }
            Ok(response)
        })
    }
}
