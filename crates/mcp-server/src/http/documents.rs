//! `/documents` routes.
//!
//! Keys are taken from the raw request path and percent-decoded here, after
//! the `/info` and `/exists` suffixes have been split off. A key that itself
//! ends in `/exists` is reachable by encoding its slash as `%2F`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use doc_store::{DocumentInfo, Encoding, ListQuery};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::envelope::{ApiError, Envelope};

/// Stored size of the document, sent on `HEAD` in place of a body.
pub const DOCUMENT_SIZE: HeaderName = HeaderName::from_static("x-document-size");

const ROUTE_PREFIX: &str = "/documents/";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub prefix: Option<String>,
    #[serde(rename = "maxKeys")]
    pub max_keys: Option<String>,
}

impl ListParams {
    fn into_query(self) -> ListQuery {
        ListQuery {
            prefix: self.prefix,
            max_keys: parse_max_keys(self.max_keys.as_deref()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub encoding: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// What a `GET /documents/...` path asks for.
#[derive(Debug, PartialEq, Eq)]
enum DocumentRoute {
    Read(String),
    Info(String),
    Exists(String),
}

/// Read `maxKeys` the way a lenient client library would: the leading digits
/// count, anything unreadable or zero means no cap was given.
fn parse_max_keys(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(u32::try_from(n).unwrap_or(u32::MAX)),
    }
}

fn parse_encoding(raw: Option<&str>) -> Result<Encoding, ApiError> {
    match raw {
        None | Some("") => Ok(Encoding::default()),
        Some(value) => value
            .parse::<Encoding>()
            .map_err(|e| ApiError::bad_request(e.to_string())),
    }
}

fn decode_key(raw: &str) -> Result<String, ApiError> {
    let key = urlencoding::decode(raw).map_err(|_| ApiError::bad_request("Invalid document key"))?;
    if key.is_empty() {
        return Err(ApiError::bad_request("Document key is required"));
    }
    Ok(key.into_owned())
}

fn raw_key(path: &str) -> &str {
    path.strip_prefix(ROUTE_PREFIX).unwrap_or(path)
}

fn parse_route(path: &str) -> Result<DocumentRoute, ApiError> {
    let raw = raw_key(path);

    if let Some(key) = raw.strip_suffix("/exists") {
        Ok(DocumentRoute::Exists(decode_key(key)?))
    } else if let Some(key) = raw.strip_suffix("/info") {
        Ok(DocumentRoute::Info(decode_key(key)?))
    } else {
        Ok(DocumentRoute::Read(decode_key(raw)?))
    }
}

/// Format a timestamp as an HTTP-date (RFC 7231).
fn http_date(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn metadata_headers(info: &DocumentInfo) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(value) = info
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(DOCUMENT_SIZE, HeaderValue::from(info.size));
    if let Ok(value) = HeaderValue::from_str(&http_date(&info.last_modified)) {
        headers.insert(header::LAST_MODIFIED, value);
    }

    headers
}

/// Handler for `GET /documents`
pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Envelope<Vec<DocumentInfo>>>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query();
    let documents = state.store.list(&query).await?;
    Ok(Json(Envelope::ok(documents)))
}

/// Handler for `GET /documents/{key}`, `/documents/{key}/info` and `/documents/{key}/exists`
pub async fn get(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    params: Result<Query<ReadParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    match parse_route(uri.path())? {
        DocumentRoute::Read(key) => {
            let encoding = parse_encoding(params.encoding.as_deref())?;
            let document = state.store.read(&key, encoding).await?;
            Ok(Json(Envelope::ok(document)).into_response())
        }
        DocumentRoute::Info(key) => match state.store.stat(&key).await? {
            Some(info) => Ok(Json(Envelope::ok(info)).into_response()),
            None => Err(ApiError::not_found("Document not found")),
        },
        DocumentRoute::Exists(key) => {
            let exists = state.store.exists(&key).await?;
            Ok(Json(Envelope::ok(ExistsResponse { exists })).into_response())
        }
    }
}

/// Handler for `HEAD /documents/{key}`
///
/// The whole path after `/documents/` is the key; there are no suffix routes.
pub async fn head(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let key = match decode_key(raw_key(uri.path())) {
        Ok(key) => key,
        Err(err) => return err.status.into_response(),
    };

    match state.store.stat(&key).await {
        Ok(Some(info)) => (StatusCode::OK, metadata_headers(&info)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
