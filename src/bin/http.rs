//! Mochi MCP server, HTTP/SSE transport
//!
//! Run with: mochi-mcp-http --port 8787

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mochi_mcp::client::BASE_URL;
use mochi_mcp::error::Result;
use mochi_mcp::http::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "mochi-mcp-http")]
#[command(about = "Mochi Cards MCP server over HTTP and SSE")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "MOCHI_MCP_PORT", default_value = "8787")]
    port: u16,

    /// Fallback Mochi API key for requests without an x-mochi-api-key header
    #[arg(long, env = "MOCHI_API_KEY")]
    api_key: Option<String>,

    /// Mochi API base URL
    #[arg(long, env = "MOCHI_API_URL", default_value = BASE_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let state = AppState::with_api_base(args.api_key, args.api_url);
    let app = router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Mochi MCP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
