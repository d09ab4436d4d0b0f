//! In-memory object backend for tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::backend::{BackendError, ObjectBackend, ObjectBody, ObjectHead, ObjectSummary, Result};

/// A stored object. Metadata fields mirror what a real backend may or may not report.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Option<Vec<u8>>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl StoredObject {
    /// An object with a body, a matching content length, and the current time as mtime.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            content_length: Some(body.len() as u64),
            body: Some(body),
            content_type: None,
            last_modified: Some(Utc::now()),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Drop everything except the body, as a sparse backend response would.
    pub fn without_metadata(mut self) -> Self {
        self.content_type = None;
        self.content_length = None;
        self.last_modified = None;
        self
    }

    /// Drop the body entirely.
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }
}

/// In-memory bucket, listed in key order.
pub struct InMemoryBackend {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    /// When set, every call fails with this message.
    failure: RwLock<Option<String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            failure: RwLock::new(None),
        }
    }

    /// Store `body` under `key`, with a content length and mtime.
    pub fn put(&self, key: &str, body: impl Into<Vec<u8>>) {
        self.put_object(key, StoredObject::new(body));
    }

    pub fn put_object(&self, key: &str, object: StoredObject) {
        let mut objects = self.objects.write().unwrap();
        objects.insert(key.to_string(), object);
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.read().unwrap().as_ref() {
            Some(message) => Err(BackendError::Service(message.clone())),
            None => Ok(()),
        }
    }

    fn lookup(&self, key: &str) -> Result<StoredObject> {
        self.check_failure()?;
        let objects = self.objects.read().unwrap();
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("The specified key does not exist: {}", key)))
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectBackend for InMemoryBackend {
    async fn list_objects(&self, prefix: Option<&str>, max_keys: u32) -> Result<Vec<ObjectSummary>> {
        self.check_failure()?;
        let objects = self.objects.read().unwrap();
        let prefix = prefix.unwrap_or("");

        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .take(max_keys as usize)
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                size: object.content_length,
                last_modified: object.last_modified,
                content_type: object.content_type.clone(),
            })
            .collect())
    }

    async fn get_object(&self, key: &str) -> Result<ObjectBody> {
        let object = self.lookup(key)?;
        Ok(ObjectBody {
            body: object.body,
            content_type: object.content_type,
            content_length: object.content_length,
            last_modified: object.last_modified,
        })
    }

    async fn head_object(&self, key: &str) -> Result<ObjectHead> {
        let object = self.lookup(key)?;
        Ok(ObjectHead {
            content_type: object.content_type,
            content_length: object.content_length,
            last_modified: object.last_modified,
        })
    }
}
