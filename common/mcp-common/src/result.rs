//! Result envelopes for MCP tool responses
//!
//! Every tool invocation ends in exactly one of two shapes: a structured
//! success payload, or an `isError: true` result carrying a single text
//! message. Callers branch on `is_error` instead of parsing error types.

use rmcp::model::{CallToolResult, Content, RawContent};
use serde_json::Value;

/// Create a successful response carrying structured content
///
/// The payload is placed in `structuredContent` and mirrored as JSON text in
/// `content` for clients that only read text.
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::structured_success;
///
/// let result = structured_success(serde_json::json!({ "sources": ["alpha"] }));
/// ```
pub fn structured_success(payload: Value) -> CallToolResult {
    CallToolResult::structured(payload)
}

/// Create an error envelope: `{content: [text: message], isError: true}`
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::error_result;
///
/// return error_result("Missing required argument: source");
/// ```
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Join the text content items of a result, one per line
pub fn result_text(result: &CallToolResult) -> String {
    let mut output = String::new();
    for content in &result.content {
        if let RawContent::Text(text) = &content.raw {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&text.text);
        }
    }
    output
}
