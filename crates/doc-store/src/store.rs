//! The document accessor: list, read, stat, and exists over an `ObjectBackend`.
//!
//! This is the only place that talks to the backend. It normalizes backend
//! responses into `DocumentInfo` / `DocumentContent` and folds every failure
//! into `StorageError`, except for the one case where absence is an ordinary
//! answer: `stat` (and therefore `exists`) on a missing key returns `None`.
//!
//! `read` does not make that distinction. A missing key is reported as a
//! `StorageError::Read` carrying the backend's message.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error};

use crate::backend::{BackendError, ObjectBackend};
use crate::types::{DEFAULT_CONTENT_TYPE, DocumentContent, DocumentInfo, Encoding, ListQuery};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to list documents: {reason}")]
    List { reason: String },

    #[error("Failed to read document {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to get document info for {key}: {reason}")]
    Stat { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

fn reason(err: BackendError) -> String {
    match err {
        BackendError::NotFound(message) | BackendError::Service(message) => message,
    }
}

/// Read-only access to the documents of one bucket.
///
/// Cheap to share: wrap it in an `Arc` and hand it to every front end.
pub struct DocumentStore {
    backend: Arc<dyn ObjectBackend>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn ObjectBackend>) -> Self {
        Self { backend }
    }

    /// List documents, filtered by prefix and capped at `max_keys`.
    ///
    /// An empty result is not an error.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<DocumentInfo>> {
        let prefix = query.effective_prefix();
        let max_keys = query.effective_max_keys();
        debug!(prefix = prefix.unwrap_or(""), max_keys, "list");

        let objects = self
            .backend
            .list_objects(prefix, max_keys)
            .await
            .map_err(|e| {
                error!("Error listing documents: {}", e);
                StorageError::List { reason: reason(e) }
            })?;

        let now = Utc::now();
        Ok(objects
            .into_iter()
            .take(max_keys as usize)
            .map(|object| DocumentInfo {
                key: object.key,
                size: object.size.unwrap_or(0),
                last_modified: object.last_modified.unwrap_or(now),
                content_type: object.content_type,
            })
            .collect())
    }

    /// Fetch a document body into memory and render it with `encoding`.
    pub async fn read(&self, key: &str, encoding: Encoding) -> Result<DocumentContent> {
        debug!(key, %encoding, "read");

        let read_error = |reason: String| {
            error!("Error reading document {}: {}", key, reason);
            StorageError::Read {
                key: key.to_string(),
                reason,
            }
        };

        let object = self
            .backend
            .get_object(key)
            .await
            .map_err(|e| read_error(reason(e)))?;

        let body = object
            .body
            .ok_or_else(|| read_error("Document has no content".to_string()))?;

        let content = match encoding {
            Encoding::Utf8 => String::from_utf8_lossy(&body).into_owned(),
            Encoding::Base64 => B64.encode(&body),
        };

        Ok(DocumentContent {
            key: key.to_string(),
            content,
            content_type: object
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            size: object.content_length.unwrap_or(0),
            last_modified: object.last_modified.unwrap_or_else(Utc::now),
        })
    }

    /// Metadata-only lookup. Returns `None` when the backend says the key does not exist.
    pub async fn stat(&self, key: &str) -> Result<Option<DocumentInfo>> {
        debug!(key, "stat");

        match self.backend.head_object(key).await {
            Ok(head) => Ok(Some(DocumentInfo {
                key: key.to_string(),
                size: head.content_length.unwrap_or(0),
                last_modified: head.last_modified.unwrap_or_else(Utc::now),
                content_type: head.content_type,
            })),
            Err(BackendError::NotFound(_)) => Ok(None),
            Err(e) => {
                error!("Error getting document info for {}: {}", key, e);
                Err(StorageError::Stat {
                    key: key.to_string(),
                    reason: reason(e),
                })
            }
        }
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.stat(key).await?.is_some())
    }
}
