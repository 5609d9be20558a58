//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::http::Response;
use axum::Router;
use http_event_log::observability::{EventLogger, MemorySink};
use serde_json::Value;
use tokio::net::TcpListener;

/// Event logger backed by a shared in-memory sink.
pub fn memory_logger() -> (EventLogger, MemorySink) {
    let sink = MemorySink::new();
    (EventLogger::new(sink.clone()), sink)
}

/// Serve `router` on an ephemeral local port as a stand-in downstream service.
pub async fn start_downstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
