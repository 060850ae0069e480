//! MCP Common - Shared utilities for MCP servers
//!
//! This crate provides the plumbing shared by the servers in this workspace:
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`] for standardized server startup
//! - **Results**: builders for the structured success and `isError` envelopes
//! - **Errors**: constructors for protocol-level MCP errors
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{error_result, structured_success};
//!
//! fn my_tool(&self, ok: bool) -> CallToolResult {
//!     if ok {
//!         structured_success(serde_json::json!({ "value": 42 }))
//!     } else {
//!         error_result("something went wrong")
//!     }
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, McpResult};
pub use init::{init_tracing, init_tracing_at, serve_stdio};
pub use result::{error_result, result_text, structured_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, JsonObject, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
