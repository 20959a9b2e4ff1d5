//! Shared utilities for exa-mcp
//!
//! This crate provides the ambient pieces every other crate in the workspace
//! relies on: tracing setup and the process configuration read at startup.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ExaConfig, ExaConfigBuilder, LogFormat};
pub use logging::init_tracing;
