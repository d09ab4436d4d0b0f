//! HTTP front end: REST document routes plus the JSON-RPC `/mcp` endpoint.

pub mod documents;
pub mod envelope;
pub mod mcp;

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use doc_store::DocumentStore;
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::tools::common::iso_timestamp;
use envelope::ApiError;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state
pub struct AppState {
    pub store: Arc<DocumentStore>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Handler for `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: iso_timestamp(&Utc::now()),
    })
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    ApiError::internal("Internal server error").into_response()
}

/// Build the application router over `store`.
pub fn router(store: Arc<DocumentStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(health))
        .route("/documents", get(documents::list))
        .route(
            "/documents/{*key}",
            get(documents::get).head(documents::head),
        )
        .route("/mcp", post(mcp::handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use doc_store::{InMemoryBackend, StoredObject};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_app() -> (Arc<InMemoryBackend>, Router) {
        let backend = Arc::new(InMemoryBackend::new());
        backend.put_object(
            "docs/a.txt",
            StoredObject::new("hello world!").with_content_type("text/plain"),
        );
        backend.put("docs/b.txt", "12345");
        let store = Arc::new(DocumentStore::new(backend.clone()));
        (backend, router(store))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, Body::empty()).await
    }

    async fn post_mcp(app: Router, body: &str) -> (StatusCode, Value) {
        send(app, Method::POST, "/mcp", Body::from(body.to_string())).await
    }

    #[tokio::test]
    async fn test_health() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_list_documents() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app, "/documents?prefix=docs/&maxKeys=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["key"], "docs/a.txt");
        assert_eq!(data[0]["size"], 12);
    }

    #[tokio::test]
    async fn test_unreadable_max_keys_falls_back_to_default_cap() {
        let (_backend, app) = create_test_app();

        for uri in ["/documents?maxKeys=many", "/documents?maxKeys=-1", "/documents?maxKeys=0"] {
            let (status, json) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(json["data"].as_array().unwrap().len(), 2, "{}", uri);
        }

        let (_, json) = get_json(app, "/documents?maxKeys=1.5").await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_query_gets_envelope() {
        let (_backend, app) = create_test_app();

        for uri in [
            "/documents?maxKeys=1&maxKeys=2",
            "/documents/docs/a.txt?encoding=utf8&encoding=base64",
        ] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(response.headers()["content-type"], "application/json");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["success"], false);
            assert!(json["error"].as_str().unwrap().contains("duplicate field"), "{}", json);
        }
    }

    #[tokio::test]
    async fn test_list_failure_is_500() {
        let (backend, app) = create_test_app();
        backend.fail_with("access denied");

        let (status, json) = get_json(app, "/documents").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to list documents: access denied");
    }

    #[tokio::test]
    async fn test_read_document() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app, "/documents/docs/a.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["content"], "hello world!");
        assert_eq!(json["data"]["contentType"], "text/plain");
        assert_eq!(json["data"]["size"], 12);
    }

    #[tokio::test]
    async fn test_read_base64() {
        let (_backend, app) = create_test_app();

        let (_, json) = get_json(app, "/documents/docs/b.txt?encoding=base64").await;
        assert_eq!(json["data"]["content"], "MTIzNDU=");
        assert_eq!(json["data"]["contentType"], "application/octet-stream");
    }

    #[tokio::test]
    async fn test_read_rejects_unknown_encoding() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app, "/documents/docs/a.txt?encoding=hex").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Unsupported encoding: hex"));
    }

    #[tokio::test]
    async fn test_read_missing_is_500() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app, "/documents/docs/missing.txt").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to read document docs/missing.txt")
        );
    }

    #[tokio::test]
    async fn test_info_and_missing_info() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app.clone(), "/documents/docs/a.txt/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["key"], "docs/a.txt");
        assert_eq!(json["data"]["contentType"], "text/plain");

        let (status, json) = get_json(app, "/documents/docs/missing.txt/info").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "success": false, "error": "Document not found" }));
    }

    #[tokio::test]
    async fn test_exists() {
        let (_backend, app) = create_test_app();

        let (_, json) = get_json(app.clone(), "/documents/docs/a.txt/exists").await;
        assert_eq!(json, json!({ "success": true, "data": { "exists": true } }));

        let (status, json) = get_json(app, "/documents/docs/nope.txt/exists").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["exists"], false);
    }

    #[tokio::test]
    async fn test_encoded_key_with_route_suffix() {
        let (backend, app) = create_test_app();
        backend.put("notes/exists", "literal");

        let (status, json) = get_json(app, "/documents/notes%2Fexists").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["content"], "literal");
    }

    #[tokio::test]
    async fn test_head_document() {
        let (_backend, app) = create_test_app();

        let request = Request::builder()
            .method(Method::HEAD)
            .uri("/documents/docs/a.txt")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/plain");
        assert_eq!(response.headers()[documents::DOCUMENT_SIZE], "12");
        assert!(response.headers().contains_key("last-modified"));

        let request = Request::builder()
            .method(Method::HEAD)
            .uri("/documents/docs/missing.txt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (_backend, app) = create_test_app();

        let (status, json) = get_json(app, "/buckets").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "success": false, "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_mcp_tools_list() {
        let (_backend, app) = create_test_app();

        let (status, json) = post_mcp(app, r#"{"jsonrpc":"2.0","method":"tools/list","id":1}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["tools"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_mcp_parse_error() {
        let (_backend, app) = create_test_app();

        let (status, json) = post_mcp(app, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], -32700);
        assert_eq!(json["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_mcp_oversized_body_is_rpc_error() {
        let (_backend, app) = create_test_app();

        let body = Body::from(vec![b' '; MAX_BODY_BYTES + 1]);
        let (status, json) = send(app, Method::POST, "/mcp", body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], Value::Null);
        assert_eq!(json["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_mcp_method_not_found_is_400() {
        let (_backend, app) = create_test_app();

        let (status, json) = post_mcp(app, r#"{"method":"prompts/list","id":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["id"], "x");
        assert_eq!(json["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_mcp_tool_failure_is_200() {
        let (backend, app) = create_test_app();
        backend.fail_with("timeout");

        let (status, json) = post_mcp(
            app,
            r#"{"method":"tools/call","params":{"name":"list_documents","arguments":{}}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["isError"], true);
    }

    #[test]
    fn test_panic_response() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
