//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool operations
///
/// The taxonomy is flat: a failed call carries a short prefix naming the
/// stage that failed and nothing else.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The argument object could not be decoded
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The remote client could not be constructed
    #[error("create client: {0}")]
    ClientConstruction(String),

    /// The remote call failed
    #[error("{operation}: {message}")]
    RemoteCall { operation: String, message: String },

    /// The output could not be rendered
    #[error("serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No tool is registered under this name
    #[error("unknown tool: {0}")]
    NotFound(String),

    /// A tool with this name is already registered
    #[error("tool already registered: {0}")]
    DuplicateTool(String),
}

impl ToolError {
    /// Wrap a remote-call failure with the operation that failed
    pub fn remote(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::RemoteCall {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    /// Whether the error was raised before the tool ran
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidArguments(_) | Self::NotFound(_))
    }
}
