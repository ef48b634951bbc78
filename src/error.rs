//! Error types for the Mochi MCP server

use thiserror::Error;

/// Result type alias for Mochi MCP operations
pub type Result<T> = std::result::Result<T, MochiError>;

/// Main error type for the Mochi MCP server
#[derive(Error, Debug)]
pub enum MochiError {
    /// Non-2xx response from the Mochi API; body text is carried verbatim
    #[error("Mochi API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch URL: {0}")]
    AttachmentFetch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MochiError {
    /// Get error code for the MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            MochiError::InvalidInput(_) => -32602,
            MochiError::Config(_) => -32603,
            _ => -32000,
        }
    }
}
