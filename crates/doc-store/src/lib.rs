//! doc-store: read-only document access over an S3-compatible object store.
//!
//! This crate provides:
//! - `ObjectBackend` - the raw list/get/head operations, with S3 and in-memory implementations
//! - `DocumentStore` - list, read, stat, and exists with normalized results and errors

pub mod backend;
pub mod memory;
pub mod s3;
pub mod store;
pub mod types;

pub use backend::{BackendError, ObjectBackend, ObjectBody, ObjectHead, ObjectSummary};
pub use memory::{InMemoryBackend, StoredObject};
pub use s3::{S3Backend, S3Config};
pub use store::{DocumentStore, StorageError};
pub use types::{
    DEFAULT_CONTENT_TYPE, DEFAULT_MAX_KEYS, DocumentContent, DocumentInfo, Encoding, ListQuery,
    ParseEncodingError,
};
