//! Error helpers for MCP servers
//!
//! These cover protocol-level failures only; per-invocation tool failures are
//! reported through [`crate::error_result`] instead.

use rmcp::ErrorData as McpError;

/// Type alias for MCP handler results
pub type McpResult<T> = Result<T, McpError>;

/// Create an internal error with a message
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}
