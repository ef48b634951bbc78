//! Mochi MCP server, stdio transport
//!
//! Run with: mochi-mcp-server (requires MOCHI_API_KEY)

use async_trait::async_trait;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mochi_mcp::client::{MochiClient, BASE_URL};
use mochi_mcp::error::Result;
use mochi_mcp::mcp::{
    get_tool_definitions, handle_tool_call, methods, InitializeResult, McpHandler, McpRequest,
    McpResponse, McpServer,
};

#[derive(Parser, Debug)]
#[command(name = "mochi-mcp-server")]
#[command(about = "Mochi Cards MCP server on stdio")]
struct Args {
    /// Mochi API key
    #[arg(long, env = "MOCHI_API_KEY")]
    api_key: Option<String>,

    /// Mochi API base URL
    #[arg(long, env = "MOCHI_API_URL", default_value = BASE_URL)]
    api_url: String,
}

/// MCP request handler backed by one client for the process lifetime
struct MochiHandler {
    client: MochiClient,
}

#[async_trait]
impl McpHandler for MochiHandler {
    async fn handle_request(&self, request: McpRequest) -> McpResponse {
        match request.method.as_str() {
            methods::INITIALIZE => {
                McpResponse::success(request.id, json!(InitializeResult::default()))
            }
            methods::INITIALIZED => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                McpResponse::success(request.id, json!({"tools": get_tool_definitions()}))
            }
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                let result = handle_tool_call(&self.client, name, &arguments).await;
                McpResponse::success(request.id, json!(result))
            }
            _ => McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let Some(api_key) = args.api_key else {
        tracing::error!("MOCHI_API_KEY environment variable is required");
        std::process::exit(1);
    };

    let client = MochiClient::with_base_url(api_key, args.api_url);
    let handler = MochiHandler { client };
    let server = McpServer::new(handler);

    tracing::info!("Mochi MCP server running on stdio");
    server.run().await
}
