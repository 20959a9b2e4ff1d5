//! Model Context Protocol (MCP) server for the Exa search API
//!
//! This crate provides:
//! - four tools adapting Exa operations (`search`, `find_similar`,
//!   `get_contents`, `answer`) to typed arguments and flattened outputs
//! - a newline-delimited JSON-RPC server speaking MCP over stdio
//!
//! # Example
//!
//! ```no_run
//! use exa_client::HttpClientFactory;
//! use exa_mcp::{McpServer, tools};
//! use exa_utils::ExaConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExaConfig::from_env()?;
//! let registry = tools::default_registry(Arc::new(HttpClientFactory::from_config(&config)))?;
//!
//! let server = Arc::new(McpServer::new(Arc::new(registry)));
//! server.serve(tokio::io::stdin(), tokio::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::MCPError;
pub use server::McpServer;

/// Result type for MCP server operations
pub type Result<T> = std::result::Result<T, MCPError>;
