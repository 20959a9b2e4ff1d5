//! Tool trait definition

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ToolError};

/// Result of a successful tool call
///
/// Carries the structured output object together with its pretty-printed
/// JSON rendering for hosts that only display text.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// Structured output as a JSON value
    pub structured: Value,
    /// Text rendering of the same data
    pub text: String,
}

impl ToolOutput {
    /// Build an output from any serializable value
    ///
    /// The text keeps the value's field order; the structured form is the
    /// plain JSON tree.
    pub fn from_serialize<T: Serialize>(output: &T) -> Result<Self> {
        let text = serde_json::to_string_pretty(output)?;
        let structured = serde_json::to_value(output)?;
        Ok(Self { structured, text })
    }
}

/// Decode a tool's argument object into its typed form
pub fn parse_arguments<T: DeserializeOwned>(params: Value) -> Result<T> {
    // Hosts may omit `arguments` entirely for tools without required fields.
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Trait for tools exposed through the registry
///
/// Each tool provides a stable name, a description, and a JSON schema for
/// its input. Tools are stateless across calls and safe to call concurrently.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    async fn execute(&self, params: Value) -> Result<ToolOutput>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Human readable title, shown by hosts that support annotations
    fn title(&self) -> Option<&str> {
        None
    }

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Get the schema of the structured output, if the tool publishes one
    fn output_schema(&self) -> Option<Value> {
        None
    }
}
