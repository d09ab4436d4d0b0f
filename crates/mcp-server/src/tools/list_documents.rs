//! ListDocuments tool - list documents, optionally under a prefix.

use doc_store::{DocumentInfo, DocumentStore, ListQuery, StorageError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::format_listing_line;

/// Parameters for the ListDocuments tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListDocumentsParams {
    /// Optional prefix to filter documents by path
    #[serde(default)]
    pub prefix: Option<String>,
    /// Maximum number of documents to return (default: 1000)
    #[serde(default, rename = "maxKeys")]
    pub max_keys: Option<u32>,
}

impl From<ListDocumentsParams> for ListQuery {
    fn from(params: ListDocumentsParams) -> Self {
        ListQuery {
            prefix: params.prefix,
            max_keys: params.max_keys,
        }
    }
}

/// Execute the ListDocuments tool.
pub async fn execute(store: &DocumentStore, params: ListDocumentsParams) -> Result<String, StorageError> {
    let documents = store.list(&params.into()).await?;
    Ok(format_listing(&documents))
}

/// Render a listing as a count header followed by one line per document.
pub fn format_listing(documents: &[DocumentInfo]) -> String {
    let lines: Vec<String> = documents.iter().map(format_listing_line).collect();
    format!("Found {} document(s):\n{}", documents.len(), lines.join("\n"))
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
    async fn test_lists_with_prefix() {
        let (backend, store) = create_test_store();
        let mtime = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        backend.put_object("docs/a.txt", StoredObject::new("hello world!").with_last_modified(mtime));
        backend.put_object("docs/b.txt", StoredObject::new("12345").with_last_modified(mtime));
        backend.put("misc/c.txt", "c");

        let params = ListDocumentsParams {
            prefix: Some("docs/".to_string()),
            max_keys: None,
        };
        let text = execute(&store, params).await.unwrap();

        assert_eq!(
            text,
            "Found 2 document(s):\n\
             - docs/a.txt (12 bytes, modified: 2025-01-01T00:00:00.000Z)\n\
             - docs/b.txt (5 bytes, modified: 2025-01-01T00:00:00.000Z)"
        );
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let (_backend, store) = create_test_store();

        let text = execute(&store, ListDocumentsParams::default()).await.unwrap();
        assert_eq!(text, "Found 0 document(s):\n");
    }

    #[tokio::test]
    async fn test_max_keys_limits_listing() {
        let (backend, store) = create_test_store();
        for i in 0..5 {
            backend.put(&format!("k{}", i), "x");
        }

        let params = ListDocumentsParams {
            prefix: None,
            max_keys: Some(3),
        };
        let text = execute(&store, params).await.unwrap();

        assert!(text.starts_with("Found 3 document(s):"));
    }
}
