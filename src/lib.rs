//! Mochi MCP - Model Context Protocol server for Mochi Cards
//!
//! Exposes cards, decks, templates, and due-for-review queries from the
//! Mochi Cards REST API as MCP tools, over stdio JSON-RPC and HTTP/SSE
//! transports.

pub mod client;
pub mod error;
pub mod http;
pub mod mcp;
pub mod types;

pub use client::MochiClient;
pub use error::{MochiError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server identity advertised during MCP initialization
pub const SERVER_NAME: &str = "mochi-mcp-server";
