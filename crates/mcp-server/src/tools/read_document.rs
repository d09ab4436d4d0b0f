//! ReadDocument tool - read a document's full content.

use doc_store::{DocumentContent, DocumentStore, Encoding, StorageError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::format_metadata;

/// Parameters for the ReadDocument tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadDocumentParams {
    /// The S3 key (path) of the document to read
    pub key: String,
    /// Encoding for the document content (default: utf8)
    #[serde(default)]
    pub encoding: Option<Encoding>,
}

/// Execute the ReadDocument tool.
///
/// A missing document is a storage error here, not a "not found" answer.
pub async fn execute(store: &DocumentStore, params: ReadDocumentParams) -> Result<String, StorageError> {
    let document = store
        .read(&params.key, params.encoding.unwrap_or_default())
        .await?;
    Ok(format_document(&document))
}

pub fn format_document(document: &DocumentContent) -> String {
    format!(
        "{}\n\nContent:\n{}",
        format_metadata(
            &document.key,
            Some(&document.content_type),
            document.size,
            &document.last_modified
        ),
        document.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use doc_store::{InMemoryBackend, StoredObject};
    use std::sync::Arc;

    fn create_test_store() -> (Arc<InMemoryBackend>, DocumentStore) {
        let backend = Arc::new(InMemoryBackend::new());
        let store = DocumentStore::new(backend.clone());
        (backend, store)
    }

    #[tokio::test]
    async fn test_read_renders_metadata_and_content() {
        let (backend, store) = create_test_store();
        let mtime = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
        backend.put_object(
            "docs/a.txt",
            StoredObject::new("hello world!")
                .with_content_type("text/plain")
                .with_last_modified(mtime),
        );

        let params = ReadDocumentParams {
            key: "docs/a.txt".to_string(),
            encoding: None,
        };
        let text = execute(&store, params).await.unwrap();

        assert_eq!(
            text,
            "Document: docs/a.txt\nContent Type: text/plain\nSize: 12 bytes\n\
             Last Modified: 2025-02-03T04:05:06.000Z\n\nContent:\nhello world!"
        );
    }

    #[tokio::test]
    async fn test_read_base64() {
        let (backend, store) = create_test_store();
        backend.put("bin", vec![0xde, 0xad, 0xbe, 0xef]);

        let params = ReadDocumentParams {
            key: "bin".to_string(),
            encoding: Some(Encoding::Base64),
        };
        let text = execute(&store, params).await.unwrap();

        assert!(text.contains("Content Type: application/octet-stream"));
        assert!(text.ends_with("Content:\n3q2+7w=="));
    }

    #[tokio::test]
    async fn test_read_missing_is_error() {
        let (_backend, store) = create_test_store();

        let params = ReadDocumentParams {
            key: "nope.txt".to_string(),
            encoding: None,
        };
        let err = execute(&store, params).await.unwrap_err();

        assert!(err.to_string().contains("Failed to read document nope.txt"));
    }
}
