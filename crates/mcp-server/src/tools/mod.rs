//! Tool dispatch shared by the stdio MCP server and the HTTP `/mcp` endpoint.
//!
//! Two failure levels:
//! - `DispatchError`: the call could not be routed to a tool at all. Front ends
//!   report it as a protocol-level error.
//! - `ToolOutcome::Failure`: the tool ran and failed (bad arguments, storage
//!   error). This is still a successful call whose payload is "Error: ..." text.

pub mod common;
pub mod document_exists;
pub mod get_document_info;
pub mod list_documents;
pub mod read_document;

use doc_store::{DocumentStore, StorageError};
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::Tool;

/// Result of running a tool, both variants rendered as a single text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Success(String),
    Failure(String),
}

impl ToolOutcome {
    pub fn text(&self) -> &str {
        match self {
            ToolOutcome::Success(text) | ToolOutcome::Failure(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Failure(_))
    }
}

impl From<ToolOutcome> for CallToolResult {
    fn from(outcome: ToolOutcome) -> Self {
        match outcome {
            ToolOutcome::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutcome::Failure(text) => CallToolResult::error(vec![Content::text(text)]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

#[derive(Debug, thiserror::Error)]
enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn parse<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(arguments))
}

async fn run(store: &DocumentStore, tool: Tool, arguments: JsonObject) -> Result<String, ToolError> {
    let text = match tool {
        Tool::ListDocuments => list_documents::execute(store, parse(arguments)?).await?,
        Tool::ReadDocument => read_document::execute(store, parse(arguments)?).await?,
        Tool::GetDocumentInfo => get_document_info::execute(store, parse(arguments)?).await?,
        Tool::DocumentExists => document_exists::execute(store, parse(arguments)?).await?,
    };
    Ok(text)
}

/// Run the tool called `name` with `arguments`.
///
/// Missing arguments are treated as an empty object; each tool decides what it requires.
pub async fn call_tool(
    store: &DocumentStore,
    name: &str,
    arguments: Option<JsonObject>,
) -> Result<ToolOutcome, DispatchError> {
    let tool = Tool::from_name(name).ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
    tracing::debug!(tool = tool.name(), "call_tool");

    match run(store, tool, arguments.unwrap_or_default()).await {
        Ok(text) => Ok(ToolOutcome::Success(text)),
        Err(e) => {
            tracing::warn!("Tool {} failed: {}", tool.name(), e);
            Ok(ToolOutcome::Failure(format!("Error: {}", e)))
        }
    }
}
