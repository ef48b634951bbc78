//! HTTP and SSE transports
//!
//! `POST /mcp` and `POST /mcp/sse` accept JSON-RPC envelopes and share one
//! handler; `GET /mcp/sse` opens an event stream that announces the server
//! and then stays quiet apart from heartbeat comments. Every tools/call
//! constructs its own client from the caller-supplied credential.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use futures::stream::{self, Stream, StreamExt};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::client::{MochiClient, BASE_URL};
use crate::mcp::dispatch::handle_tool_call;
use crate::mcp::protocol::{methods, InitializeResult, McpResponse};
use crate::mcp::tools::get_tool_definitions;

/// Heartbeat interval for the SSE stream
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Header carrying the per-request credential
const API_KEY_HEADER: &str = "x-mochi-api-key";

/// Router state: the fallback credential and the API host
#[derive(Debug, Clone)]
pub struct AppState {
    api_key: Option<String>,
    api_base: String,
}

impl AppState {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_api_base(api_key, BASE_URL)
    }

    pub fn with_api_base(api_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key,
            api_base: api_base.into(),
        }
    }

    /// Caller header first, configured fallback second
    fn resolve_key(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .or_else(|| self.api_key.clone())
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", get(server_info).post(rpc))
        .route("/mcp/sse", get(sse).post(rpc))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn server_info() -> Json<Value> {
    Json(json!({
        "name": crate::SERVER_NAME,
        "version": crate::VERSION,
        "description": "MCP Server for Mochi Cards",
        "endpoints": {
            "/mcp": "POST - MCP JSON-RPC endpoint",
            "/mcp/sse": "GET - SSE endpoint for streaming",
        },
    }))
}

/// JSON-RPC endpoint shared by `/mcp` and `/mcp/sse`
async fn rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(api_key) = state.resolve_key(&headers) else {
        return missing_key_response();
    };

    let id = body.get("id").cloned();
    let method = body.get("method").and_then(|v| v.as_str()).unwrap_or("");

    match method {
        methods::INITIALIZE => json_rpc_result(id, json!(InitializeResult::default())),
        methods::LIST_TOOLS => json_rpc_result(id, json!({"tools": get_tool_definitions()})),
        methods::CALL_TOOL => {
            let params = body.get("params").cloned().unwrap_or_else(|| json!({}));
            let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let arguments = params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));

            let client = MochiClient::with_base_url(api_key, state.api_base.clone());
            let result = handle_tool_call(&client, name, &arguments).await;
            json_rpc_result(id, json!(result))
        }
        methods::INITIALIZED => StatusCode::NO_CONTENT.into_response(),
        other => json_rpc_error(id, -32601, format!("Method not found: {}", other)),
    }
}

/// SSE endpoint: bootstrap events, then heartbeats until the client drops
async fn sse(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.resolve_key(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, "MOCHI_API_KEY is required").into_response();
    }

    Sse::new(bootstrap_stream())
        .keep_alive(
            KeepAlive::new()
                .interval(HEARTBEAT_INTERVAL)
                .text("heartbeat"),
        )
        .into_response()
}

/// `event: open`, then `event: message` with the initialized notification.
/// The stream then parks; the keep-alive layer emits comment heartbeats and
/// the whole thing is torn down when the connection closes.
fn bootstrap_stream() -> impl Stream<Item = std::result::Result<Event, Infallible>> {
    let announce = json!({
        "jsonrpc": "2.0",
        "method": methods::INITIALIZED,
        "params": json!(InitializeResult::default()),
    });

    stream::iter(vec![
        Ok(Event::default()
            .event("open")
            .data(json!({"status": "connected"}).to_string())),
        Ok(Event::default().event("message").data(announce.to_string())),
    ])
    .chain(stream::pending())
}

fn json_rpc_result(id: Option<Value>, result: Value) -> Response {
    Json(json!(McpResponse::success(id, result))).into_response()
}

fn json_rpc_error(id: Option<Value>, code: i64, message: String) -> Response {
    Json(json!(McpResponse::error(id, code, message))).into_response()
}

fn missing_key_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "MOCHI_API_KEY is required"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_key_wins_over_fallback() {
        let state = AppState::new(Some("fallback".to_string()));
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "from-header".parse().unwrap());

        assert_eq!(state.resolve_key(&headers), Some("from-header".to_string()));
        assert_eq!(
            state.resolve_key(&HeaderMap::new()),
            Some("fallback".to_string())
        );
    }

    #[test]
    fn no_key_anywhere_resolves_to_none() {
        let state = AppState::new(None);
        assert_eq!(state.resolve_key(&HeaderMap::new()), None);
    }
}
