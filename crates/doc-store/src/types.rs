//! Document types returned by the accessor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of keys returned by a list call when the caller gives no cap.
/// Also the largest single page the backend will hand back.
pub const DEFAULT_MAX_KEYS: u32 = 1000;

/// Content type reported for read results when the backend has none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata about a stored document, as produced by list and stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub key: String,
    /// Size in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A fully materialized document body plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub key: String,
    /// Body text, either decoded UTF-8 or base64 depending on the requested encoding
    pub content: String,
    pub content_type: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Filter and cap for a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub prefix: Option<String>,
    pub max_keys: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_max_keys(mut self, max_keys: u32) -> Self {
        self.max_keys = Some(max_keys);
        self
    }

    /// The prefix to send to the backend. Empty prefixes mean "no filter".
    pub fn effective_prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// The cap to apply, in `1..=DEFAULT_MAX_KEYS`. Zero falls back to the default.
    pub fn effective_max_keys(&self) -> u32 {
        match self.max_keys {
            None | Some(0) => DEFAULT_MAX_KEYS,
            Some(n) => n.min(DEFAULT_MAX_KEYS),
        }
    }
}

/// How a document body is rendered into `DocumentContent::content`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Base64,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported encoding: {0} (expected utf8 or base64)")]
pub struct ParseEncodingError(pub String);

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utf8" => Ok(Encoding::Utf8),
            "base64" => Ok(Encoding::Base64),
            other => Err(ParseEncodingError(other.to_string())),
        }
    }
}
