//! The tool catalog: one static table of tool descriptors.
//!
//! Both the stdio MCP server and the HTTP `/mcp` endpoint answer discovery
//! requests from this table. Input schemas are generated from the same
//! parameter structs the dispatcher deserializes into, so the advertised
//! schema and the accepted arguments cannot drift apart.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::tools::document_exists::DocumentExistsParams;
use crate::tools::get_document_info::GetDocumentInfoParams;
use crate::tools::list_documents::ListDocumentsParams;
use crate::tools::read_document::ReadDocumentParams;

/// The four tools, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListDocuments,
    ReadDocument,
    GetDocumentInfo,
    DocumentExists,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::ListDocuments,
        Tool::ReadDocument,
        Tool::GetDocumentInfo,
        Tool::DocumentExists,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::ListDocuments => "list_documents",
            Tool::ReadDocument => "read_document",
            Tool::GetDocumentInfo => "get_document_info",
            Tool::DocumentExists => "document_exists",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::ListDocuments => "List documents in the S3 bucket with optional prefix filtering",
            Tool::ReadDocument => "Read the content of a specific document from the S3 bucket",
            Tool::GetDocumentInfo => "Get metadata information about a specific document",
            Tool::DocumentExists => "Check if a document exists in the S3 bucket",
        }
    }

    fn input_schema(&self) -> JsonObject {
        match self {
            Tool::ListDocuments => schema_for::<ListDocumentsParams>(),
            Tool::ReadDocument => schema_for::<ReadDocumentParams>(),
            Tool::GetDocumentInfo => schema_for::<GetDocumentInfoParams>(),
            Tool::DocumentExists => schema_for::<DocumentExistsParams>(),
        }
    }
}

fn schema_for<T: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

/// Name, description, and argument schema of one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// The descriptor in rmcp's model, for the stdio server.
    pub fn to_rmcp(&self) -> rmcp::model::Tool {
        rmcp::model::Tool::new(self.name, self.description, self.input_schema.clone())
    }
}

static CATALOG: Lazy<Vec<ToolDescriptor>> = Lazy::new(|| {
    Tool::ALL
        .iter()
        .map(|tool| ToolDescriptor {
            name: tool.name(),
            description: tool.description(),
            input_schema: Arc::new(tool.input_schema()),
        })
        .collect()
});

/// The shared tool catalog.
pub fn tool_catalog() -> &'static [ToolDescriptor] {
    &CATALOG
}
