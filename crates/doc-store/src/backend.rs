//! ObjectBackend trait: the raw object-store operations the accessor consumes.
//!
//! Implementations:
//! - `S3Backend` - Any S3-compatible endpoint via aws-sdk-s3
//! - `InMemoryBackend` - For testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The backend reported that the object does not exist.
    #[error("NotFound: {0}")]
    NotFound(String),

    /// Connectivity, permission, malformed response, or anything else.
    #[error("{0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// One entry of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_type: Option<String>,
}

/// A fetched object. `body` is `None` when the backend returned no payload at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBody {
    pub body: Option<Vec<u8>>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Metadata from a headers-only request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHead {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Object-store operations, scoped to a single bucket.
///
/// Every call is a single attempt; implementations must not retry.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// List at most `max_keys` objects, optionally filtered by key prefix.
    async fn list_objects(&self, prefix: Option<&str>, max_keys: u32) -> Result<Vec<ObjectSummary>>;

    /// Fetch an object and its body.
    async fn get_object(&self, key: &str) -> Result<ObjectBody>;

    /// Fetch an object's metadata without transferring the body.
    async fn head_object(&self, key: &str) -> Result<ObjectHead>;
}
