//! Type definitions for telegram MCP

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Response Types
// ============================================================================

/// A normalized message: UTC-stamped, text-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMessage {
    pub id: i64,
    /// ISO-8601 timestamp with an explicit `+00:00` offset
    pub ts: String,
    pub text: String,
}

/// Response for list_sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSourcesResponse {
    pub sources: Vec<String>,
}

/// Response for read_messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadMessagesResponse {
    pub source: String,
    /// Oldest first
    pub messages: Vec<CanonicalMessage>,
}

/// Response for get_checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointResponse {
    pub source: String,
    pub last_message_id: Option<i64>,
}

// ============================================================================
// Error Types
// ============================================================================

/// Startup failures. Nothing can be served when one of these occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required env vars: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("TELEGRAM_API_ID must be an integer, got {0:?}")]
    InvalidApiId(String),

    #[error("Failed to read env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Tool arguments that do not match the declared input schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Missing required argument: {0}")]
    Missing(&'static str),

    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Unexpected argument: {0}")]
    Unexpected(String),
}

/// Source rejected by the allowlist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Source is not allowlisted. Add it to ALLOWLIST_SOURCES.")]
    NotAllowlisted,
}

/// Failures raised by the upstream message source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Telegram session is not authorized; log in with this session file first")]
    Unauthorized,

    #[error("Cannot resolve source: {0}")]
    UnresolvedSource(String),

    #[error("Upstream transport error: {0}")]
    Transport(String),
}

/// Failures that prevent a tool from being routed at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Any per-invocation failure, reported to callers as an error envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vars_message() {
        let err = ConfigError::MissingVars(vec!["TELEGRAM_API_ID", "TELEGRAM_API_HASH"]);
        assert_eq!(
            err.to_string(),
            "Missing required env vars: TELEGRAM_API_ID, TELEGRAM_API_HASH"
        );
    }

    #[test]
    fn test_tool_error_is_transparent() {
        let err: ToolError = ArgumentError::OutOfRange {
            field: "limit",
            min: 1,
            max: 500,
        }
        .into();
        assert_eq!(err.to_string(), "limit must be between 1 and 500");

        let err: ToolError = PolicyError::NotAllowlisted.into();
        assert!(!err.to_string().contains("alpha"));
    }

    #[test]
    fn test_checkpoint_serializes_null() {
        let response = CheckpointResponse {
            source: "chan".to_string(),
            last_message_id: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "source": "chan", "last_message_id": null })
        );
    }
}
