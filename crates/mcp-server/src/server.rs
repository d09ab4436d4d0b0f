//! MCP server over stdio, backed by the shared catalog and dispatcher.
//!
//! `list_tools` and `call_tool` are implemented by hand instead of through
//! `#[tool_router]` so that this server and the HTTP `/mcp` endpoint serve
//! one catalog and one dispatcher.

use std::sync::Arc;

use doc_store::DocumentStore;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};

use crate::catalog::tool_catalog;
use crate::tools;

/// The MCP server state: just a handle to the document store.
#[derive(Clone)]
pub struct DocumentServer {
    store: Arc<DocumentStore>,
}

impl DocumentServer {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }
}

impl ServerHandler for DocumentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bucket-docs".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Bucket Docs MCP server - provides read-only tools for listing and reading documents in an S3 bucket."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = tool_catalog().iter().map(|d| d.to_rmcp()).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = tools::call_tool(&self.store, &request.name, request.arguments)
            .await
            .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;
        Ok(outcome.into())
    }
}
