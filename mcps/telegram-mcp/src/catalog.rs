//! Tool catalog
//!
//! The three tools this server exposes, with their literal input and output
//! JSON Schemas. The catalog is built once at startup and never changes.

use std::sync::Arc;

use mcp_common::{JsonObject, Tool};
use serde_json::{json, Value};

use crate::params::{MAX_LIMIT, MIN_LIMIT};

pub const LIST_SOURCES: &str = "list_sources";
pub const READ_MESSAGES: &str = "read_messages";
pub const GET_CHECKPOINT: &str = "get_checkpoint";

/// Build the tool descriptors in their advertised order
pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            LIST_SOURCES,
            "List allowlisted Telegram sources.",
            json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            json!({
                "type": "object",
                "properties": {
                    "sources": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["sources"]
            }),
        ),
        tool(
            READ_MESSAGES,
            "Read text-only messages from a Telegram source.",
            json!({
                "type": "object",
                "properties": {
                    "source": { "type": "string" },
                    "limit": { "type": "integer", "minimum": MIN_LIMIT, "maximum": MAX_LIMIT }
                },
                "required": ["source"],
                "additionalProperties": false
            }),
            json!({
                "type": "object",
                "properties": {
                    "source": { "type": "string" },
                    "messages": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "integer" },
                                "ts": { "type": "string" },
                                "text": { "type": "string" }
                            },
                            "required": ["id", "ts", "text"]
                        }
                    }
                },
                "required": ["source", "messages"]
            }),
        ),
        tool(
            GET_CHECKPOINT,
            "Get the last processed message ID for a source (not yet persisted).",
            json!({
                "type": "object",
                "properties": { "source": { "type": "string" } },
                "required": ["source"],
                "additionalProperties": false
            }),
            json!({
                "type": "object",
                "properties": {
                    "source": { "type": "string" },
                    "last_message_id": { "type": ["integer", "null"] }
                },
                "required": ["source", "last_message_id"]
            }),
        ),
    ]
}

fn tool(name: &'static str, description: &'static str, input: Value, output: Value) -> Tool {
    let mut tool = Tool::new(name, description, schema(input));
    tool.output_schema = Some(schema(output));
    tool
}

fn schema(value: Value) -> Arc<JsonObject> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}
