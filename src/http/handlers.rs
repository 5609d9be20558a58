//! Demo endpoints.
//!
//! `create_person` exercises every logging path: it reads the request body,
//! calls a downstream service through [`OutboundClient`](crate::client::OutboundClient)
//! and returns a side-effecting 201.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::http::context::RequestContext;
use crate::http::response::AppError;
use crate::http::server::AppState;

/// `POST /person/{name}`
pub async fn create_person(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Response, AppError> {
    let _payload: Map<String, Value> = serde_json::from_slice(&body)?;

    let request = reqwest::Request::new(Method::GET, state.downstream_url.clone());
    let response = state
        .client
        .send(&request, state.downstream_timeout, &ctx.reference_id)
        .await?;

    tracing::debug!(
        reference_id = %ctx.reference_id,
        downstream_status = %response.status(),
        "downstream call completed"
    );

    Ok((StatusCode::CREATED, Json(json!({ "result": name }))).into_response())
}

/// `GET /api/v1`
pub async fn version() -> Json<Value> {
    Json(json!({ "version": "1" }))
}

/// `GET /api/v1/silent`
pub async fn silent() -> StatusCode {
    StatusCode::OK
}
