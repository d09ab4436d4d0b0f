//! `POST /mcp`: JSON-RPC over plain HTTP.
//!
//! The body is parsed here rather than through the `Json` extractor so that
//! malformed input gets a JSON-RPC parse error instead of axum's plain-text
//! rejection, and so that clients omitting `Content-Type` are still served.
//! A body the server refuses to buffer (over the size limit) keeps its HTTP
//! status but is answered with a JSON-RPC error object.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::AppState;
use crate::rpc::{self, RpcError, RpcRequest, RpcResponse};

/// Handler for `POST /mcp`
pub async fn handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Rejected /mcp body: {}", rejection.body_text());
            let response = RpcResponse::failure(
                Value::Null,
                RpcError::invalid_request(rejection.body_text()),
            );
            return (rejection.status(), Json(response)).into_response();
        }
    };

    let response = match serde_json::from_slice::<RpcRequest>(&body) {
        Ok(request) => rpc::handle(&state.store, request).await,
        Err(e) => {
            tracing::debug!("Unparseable /mcp body: {}", e);
            RpcResponse::failure(Value::Null, RpcError::parse_error())
        }
    };

    let status = if response.is_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    (status, Json(response)).into_response()
}
