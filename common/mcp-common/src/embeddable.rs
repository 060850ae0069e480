//! Embeddable MCP trait for in-process execution
//!
//! This module provides the [`EmbeddableMcp`] trait that allows MCP servers
//! to be driven directly in-process, without a stdio transport in between.
//! Tests and host applications use it to call tools by name.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let tools = server.list_tools();
//! let result = server
//!     .call_tool("get_checkpoint", serde_json::json!({ "source": "alpha" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
///
/// Only failures that prevent a tool from running at all end up here.
/// A tool that runs and fails reports through an `isError` result instead.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Parameters were not a JSON object
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// MCP protocol error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a host can hold them behind an
/// `Arc` and call them from any task.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Returns the server name for identification
    fn server_name(&self) -> &str;

    /// Returns a list of all available tools
    ///
    /// Each tool includes its name, description, and input/output schemas.
    fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name with the given parameters
    ///
    /// # Arguments
    ///
    /// * `name` - The tool name as returned by `list_tools`
    /// * `params` - JSON object containing the tool parameters (`null` is
    ///   treated as an empty object)
    ///
    /// # Returns
    ///
    /// Returns the tool result (success or `isError` envelope), or an error if
    /// the tool is not found or `params` is not an object.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Returns an optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }

    /// Returns the server version, if available
    fn server_version(&self) -> Option<&str> {
        None
    }
}
