//! HTTP transport tests: JSON-RPC envelope handling, credential checks,
//! and the SSE endpoint, driven against the router in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mochi_mcp::http::{router, AppState};

fn app(fallback_key: Option<&str>) -> Router {
    router(AppState::new(fallback_key.map(String::from)))
}

async fn post_rpc(app: Router, uri: &str, key: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-mochi-api-key", key);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn missing_credential_yields_401_with_error_body() {
    let (status, body) = post_rpc(
        app(None),
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("error").is_some(), "body was {body}");
}

#[tokio::test]
async fn fallback_key_admits_requests_without_a_header() {
    let (status, body) = post_rpc(
        app(Some("server-key")),
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["tools"].is_array());
}

#[tokio::test]
async fn initialize_reports_server_identity() {
    let (status, body) = post_rpc(
        app(None),
        "/mcp",
        Some("k"),
        json!({"jsonrpc": "2.0", "id": 7, "method": "initialize"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(7));
    assert_eq!(body["result"]["protocolVersion"], json!("2024-11-05"));
    assert_eq!(body["result"]["capabilities"], json!({"tools": {}}));
    assert_eq!(
        body["result"]["serverInfo"],
        json!({"name": "mochi-mcp-server", "version": "1.0.0"})
    );
}

#[tokio::test]
async fn catalog_is_identical_on_both_rpc_endpoints() {
    let request = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});

    let (_, plain) = post_rpc(app(None), "/mcp", Some("k"), request.clone()).await;
    let (_, sse) = post_rpc(app(None), "/mcp/sse", Some("k"), request).await;

    assert_eq!(plain["result"]["tools"], sse["result"]["tools"]);
    assert_eq!(plain["result"]["tools"].as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn unknown_method_maps_to_method_not_found() {
    let (status, body) = post_rpc(
        app(None),
        "/mcp",
        Some("k"),
        json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], json!(-32601));
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("resources/list"));
}

#[tokio::test]
async fn initialized_notification_is_acknowledged_with_no_content() {
    let (status, body) = post_rpc(
        app(None),
        "/mcp/sse",
        Some("k"),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn unknown_tool_call_comes_back_as_tool_error_not_transport_error() {
    let (status, body) = post_rpc(
        app(None),
        "/mcp",
        Some("k"),
        json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": {"name": "frobnicate", "arguments": {}},
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["isError"], json!(true));
    assert!(body["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("frobnicate"));
}

#[tokio::test]
async fn server_info_is_served_on_get() {
    let request = Request::builder()
        .method("GET")
        .uri("/mcp")
        .body(Body::empty())
        .unwrap();
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["name"], json!("mochi-mcp-server"));
    assert!(body["endpoints"]["/mcp/sse"].is_string());
}

#[tokio::test]
async fn sse_requires_a_credential() {
    let request = Request::builder()
        .method("GET")
        .uri("/mcp/sse")
        .body(Body::empty())
        .unwrap();
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sse_opens_an_event_stream_when_authorized() {
    let request = Request::builder()
        .method("GET")
        .uri("/mcp/sse")
        .header("x-mochi-api-key", "k")
        .body(Body::empty())
        .unwrap();
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    // Read only the first frame; the stream itself never terminates
    let mut body = response.into_body().into_data_stream();
    let first = futures::StreamExt::next(&mut body).await.unwrap().unwrap();
    let text = String::from_utf8(first.to_vec()).unwrap();
    assert!(text.contains("event: open"), "first frame was {text}");
}
