use doc_store::{DocumentStore, StorageError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::format_metadata;

/// Parameters for the GetDocumentInfo tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDocumentInfoParams {
    /// The S3 key (path) of the document
    pub key: String,
}

/// Execute the GetDocumentInfo tool.
///
/// A missing document is a normal answer, rendered as "not found" text.
pub async fn execute(store: &DocumentStore, params: GetDocumentInfoParams) -> Result<String, StorageError> {
    match store.stat(&params.key).await? {
        Some(info) => Ok(format_metadata(
            &info.key,
            info.content_type.as_deref(),
            info.size,
            &info.last_modified,
        )),
        None => Ok(format!("Document '{}' not found", params.key)),
    }
}
