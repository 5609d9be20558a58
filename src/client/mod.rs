//! Outbound HTTP calls.
//!
//! # Responsibilities
//! - Send a single request to a downstream service with a per-call timeout
//! - Log the request and response as one `out '...'` event
//! - Hand the caller a response whose body is already buffered
//!
//! # Design Decisions
//! - No retries here; failures are logged and returned to the caller
//! - Request bodies must be in memory so they can be logged; streaming
//!   bodies are rejected before anything is sent

use std::collections::BTreeMap;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Response};
use reqwest::{Client, Request, Url};

use crate::observability::format::format_query;
use crate::observability::{field, EventLogger, Field};

/// Error type for outbound calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request body is a stream and cannot be buffered")]
    UnbufferedBody,

    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),
}

/// Logging wrapper around a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct OutboundClient {
    client: Client,
    logger: EventLogger,
}

impl OutboundClient {
    pub fn new(logger: EventLogger) -> Self {
        Self::with_client(Client::new(), logger)
    }

    pub fn with_client(client: Client, logger: EventLogger) -> Self {
        Self { client, logger }
    }

    /// Send a copy of `request`, giving up after `timeout`.
    ///
    /// The caller keeps `request` and may send it again. `reference_id` ties
    /// the logged event to the inbound transaction that triggered the call.
    pub async fn send(
        &self,
        request: &Request,
        timeout: Duration,
        reference_id: &str,
    ) -> Result<Response<Bytes>, ClientError> {
        let outgoing = Outgoing::from_request(request);

        // `try_clone` only fails for streaming bodies, which can't be logged either.
        let (mut attempt, request_body) = match request.try_clone() {
            Some(attempt) => {
                let body = attempt
                    .body()
                    .and_then(|body| body.as_bytes())
                    .map(Bytes::copy_from_slice)
                    .unwrap_or_default();
                (attempt, body)
            }
            None => {
                let err = ClientError::UnbufferedBody;
                self.logger.log(
                    "failed to buffer request body",
                    [
                        field::reference_id(reference_id),
                        field::error(&err),
                        outgoing.field(&[]),
                    ],
                );
                return Err(err);
            }
        };

        *attempt.timeout_mut() = Some(timeout);
        let timeout_ms = timeout.as_millis().to_string();

        let response = match self.client.execute(attempt).await {
            Ok(response) => response,
            Err(err) => {
                self.logger.log(
                    "failed to send request",
                    [
                        field::reference_id(reference_id),
                        field::error(&err),
                        field::context([("timeout_ms", timeout_ms.as_str())]),
                        outgoing.field(&request_body),
                    ],
                );
                return Err(ClientError::Send(err));
            }
        };

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        let response_body = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.logger.log(
                    "failed to read response body",
                    [
                        field::reference_id(reference_id),
                        field::error(&err),
                        field::context([("timeout_ms", timeout_ms.as_str())]),
                        outgoing.field(&request_body),
                        field::response(status.as_u16(), &headers, &[]),
                    ],
                );
                return Err(ClientError::ReadBody(err));
            }
        };

        self.logger.log(
            format!(
                "out '{} {}{}' {}",
                outgoing.method,
                outgoing.host,
                outgoing.path,
                status.as_u16()
            ),
            [
                field::reference_id(reference_id),
                outgoing.field(&request_body),
                field::response(status.as_u16(), &headers, &response_body),
            ],
        );

        let mut buffered = Response::new(response_body);
        *buffered.status_mut() = status;
        *buffered.version_mut() = version;
        *buffered.headers_mut() = headers;
        Ok(buffered)
    }
}

/// Loggable view of a request.
struct Outgoing {
    method: String,
    host: String,
    path: String,
    query: BTreeMap<String, Vec<String>>,
    headers: HeaderMap,
}

impl Outgoing {
    fn from_request(request: &Request) -> Self {
        let url = request.url();
        Self {
            method: request.method().as_str().to_string(),
            host: url_host(url),
            path: url.path().to_string(),
            query: format_query(url.query()),
            headers: request.headers().clone(),
        }
    }

    fn field(&self, body: &[u8]) -> Field {
        field::request(
            &self.method,
            &self.host,
            &self.path,
            self.query.clone(),
            &self.headers,
            body,
        )
    }
}

/// Host and explicit port of a URL, as sent in the `Host` header.
fn url_host(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;
    use reqwest::{Body, Method};

    #[test]
    fn test_url_host() {
        let url = Url::parse("http://example.org/p").unwrap();
        assert_eq!(url_host(&url), "example.org");

        let url = Url::parse("http://127.0.0.1:9000/p?q=1").unwrap();
        assert_eq!(url_host(&url), "127.0.0.1:9000");
    }

    #[test]
    fn test_outgoing_view() {
        let mut request = Request::new(
            Method::POST,
            Url::parse("http://example.org:8080/items?tag=a&tag=b").unwrap(),
        );
        request
            .headers_mut()
            .insert("content-type", "application/json".parse().unwrap());

        let outgoing = Outgoing::from_request(&request);
        assert_eq!(outgoing.method, "POST");
        assert_eq!(outgoing.host, "example.org:8080");
        assert_eq!(outgoing.path, "/items");
        assert_eq!(outgoing.query["tag"], vec!["a", "b"]);
        assert_eq!(outgoing.headers.len(), 1);
    }

    #[tokio::test]
    async fn test_streaming_body_is_rejected() {
        let sink = MemorySink::new();
        let client = OutboundClient::new(EventLogger::new(sink.clone()));

        let stream = futures_util::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from("chunk"))]);
        let mut request = Request::new(Method::POST, Url::parse("http://127.0.0.1:9/").unwrap());
        *request.body_mut() = Some(Body::wrap_stream(stream));

        let err = client
            .send(&request, Duration::from_secs(1), "ref-stream")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnbufferedBody));

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["message"], "failed to buffer request body");
        assert_eq!(events[0]["reference_id"], "ref-stream");
        assert_eq!(events[0]["request"]["method"], "POST");
    }
}
