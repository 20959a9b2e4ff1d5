//! Tool management and dispatch framework for exa-mcp
//!
//! This crate provides the registration surface: a [`Tool`] trait describing
//! a named, schema-described capability, and a [`ToolRegistry`] a host
//! dispatcher uses to look tools up by name.

pub mod error;
pub mod registry;
pub mod schema;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolOutput, parse_arguments};
