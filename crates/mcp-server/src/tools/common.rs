//! Shared formatting for tool output.

use chrono::{DateTime, SecondsFormat, Utc};
use doc_store::DocumentInfo;

/// Format a timestamp as ISO 8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format the metadata block shared by ReadDocument and GetDocumentInfo.
pub fn format_metadata(key: &str, content_type: Option<&str>, size: u64, last_modified: &DateTime<Utc>) -> String {
    format!(
        "Document: {}\nContent Type: {}\nSize: {} bytes\nLast Modified: {}",
        key,
        content_type.unwrap_or("unknown"),
        size,
        iso_timestamp(last_modified)
    )
}

/// Format one line of a document listing.
pub fn format_listing_line(doc: &DocumentInfo) -> String {
    format!(
        "- {} ({} bytes, modified: {})",
        doc.key,
        doc.size,
        iso_timestamp(&doc.last_modified)
    )
}
