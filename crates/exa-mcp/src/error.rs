//! Error types for the MCP server

use thiserror::Error;

/// Errors that end the server loop
///
/// Tool failures are not among them: those are reported to the client as
/// tool results and the loop continues.
#[derive(Error, Debug)]
pub enum MCPError {
    /// Reading from or writing to the transport failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A response could not be serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A background task panicked or was aborted
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<tokio::task::JoinError> for MCPError {
    fn from(err: tokio::task::JoinError) -> Self {
        MCPError::InternalError(err.to_string())
    }
}
