//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC framing, the tool catalog, and the dispatcher shared by the
//! stdio and HTTP transports.

pub mod dispatch;
pub mod protocol;
pub mod tools;

pub use dispatch::handle_tool_call;
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ToolCallResult,
};
pub use tools::{get_tool_definitions, TOOL_DEFINITIONS};
