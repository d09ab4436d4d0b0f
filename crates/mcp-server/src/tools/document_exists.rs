use doc_store::{DocumentStore, StorageError};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for the DocumentExists tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DocumentExistsParams {
    /// The S3 key (path) of the document to check
    pub key: String,
}

pub async fn execute(store: &DocumentStore, params: DocumentExistsParams) -> Result<String, StorageError> {
    let exists = store.exists(&params.key).await?;
    let verdict = if exists { "exists" } else { "does not exist" };
    Ok(format!("Document '{}' {}", params.key, verdict))
}
