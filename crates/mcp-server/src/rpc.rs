//! JSON-RPC handling for the HTTP `/mcp` endpoint.
//!
//! Supports `tools/list` and `tools/call`. The caller's `id` is echoed back
//! unchanged; when absent or null it defaults to `1`.

use doc_store::DocumentStore;
use rmcp::model::{CallToolResult, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::catalog::tool_catalog;
use crate::tools::{self, DispatchError};

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// An inbound request. Every field is optional on the wire; `jsonrpc`, when
/// sent, must be "2.0".
#[derive(Debug, Default, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Parameters of `tools/call`.
#[derive(Debug, Deserialize)]
pub struct CallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<JsonObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn parse_error() -> Self {
        Self {
            code: PARSE_ERROR,
            message: "Parse error".to_string(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_REQUEST,
            message: message.into(),
        }
    }

    pub fn method_not_found() -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: message.into(),
        }
    }
}

impl From<DispatchError> for RpcError {
    fn from(err: DispatchError) -> Self {
        RpcError::invalid_params(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Handle one request against `store`.
pub async fn handle(store: &DocumentStore, request: RpcRequest) -> RpcResponse {
    let id = request.id.unwrap_or_else(|| json!(1));
    tracing::debug!(method = %request.method, "rpc request");

    if let Some(version) = request.jsonrpc.as_deref().filter(|v| *v != JSONRPC_VERSION) {
        return RpcResponse::failure(
            id,
            RpcError::invalid_request(format!("Invalid Request: unsupported jsonrpc version {}", version)),
        );
    }

    match request.method.as_str() {
        "tools/list" => RpcResponse::success(id, json!({ "tools": tool_catalog() })),
        "tools/call" => match call(store, request.params).await {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::failure(id, error),
        },
        _ => RpcResponse::failure(id, RpcError::method_not_found()),
    }
}

async fn call(store: &DocumentStore, params: Option<Value>) -> Result<Value, RpcError> {
    let params = params.ok_or_else(|| RpcError::invalid_params("Invalid params: missing tools/call params"))?;
    let params: CallParams = serde_json::from_value(params)
        .map_err(|e| RpcError::invalid_params(format!("Invalid params: {}", e)))?;

    let outcome = tools::call_tool(store, &params.name, params.arguments).await?;
    let result: CallToolResult = outcome.into();

    serde_json::to_value(result).map_err(|e| RpcError::internal_error(e.to_string()))
}
