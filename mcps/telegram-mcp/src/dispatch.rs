//! Tool dispatch
//!
//! Routes an invocation (tool name plus argument map) to its handler. Every
//! known tool produces exactly one [`InvocationResult`]; only an unknown tool
//! name fails outside that envelope.

use std::sync::Arc;

use mcp_common::{error_result, structured_success, CallToolResult};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::{GET_CHECKPOINT, LIST_SOURCES, READ_MESSAGES};
use crate::normalize::normalize;
use crate::params::{expect_no_arguments, Arguments, CheckpointParams, ReadMessagesParams};
use crate::policy::Allowlist;
use crate::types::{
    CheckpointResponse, DispatchError, ListSourcesResponse, ReadMessagesResponse, ToolError,
    ToolResult,
};
use crate::upstream::{fetch_scoped, MessageSource};

/// Outcome of one invocation of a known tool
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    /// Payload matching the tool's output schema
    Success(Value),
    /// Human-readable failure, reported with `isError: true`
    Error(String),
}

impl InvocationResult {
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => InvocationResult::Success(value),
            Err(e) => InvocationResult::Error(format!("Failed to encode result: {}", e)),
        }
    }

    pub fn from_result<T: Serialize>(result: ToolResult<T>) -> Self {
        match result {
            Ok(payload) => Self::success(&payload),
            Err(err) => err.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, InvocationResult::Error(_))
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            InvocationResult::Success(payload) => structured_success(payload),
            InvocationResult::Error(message) => error_result(message),
        }
    }
}

impl From<ToolError> for InvocationResult {
    fn from(err: ToolError) -> Self {
        InvocationResult::Error(err.to_string())
    }
}

/// Routes invocations against an immutable allowlist and upstream
#[derive(Clone)]
pub struct Dispatcher {
    allowlist: Arc<Allowlist>,
    upstream: Arc<dyn MessageSource>,
}

impl Dispatcher {
    pub fn new(allowlist: Allowlist, upstream: Arc<dyn MessageSource>) -> Self {
        Self {
            allowlist: Arc::new(allowlist),
            upstream,
        }
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    /// Route `name` to its handler
    pub async fn dispatch(
        &self,
        name: &str,
        args: &Arguments,
    ) -> Result<InvocationResult, DispatchError> {
        let outcome = match name {
            LIST_SOURCES => InvocationResult::from_result(self.list_sources(args)),
            READ_MESSAGES => InvocationResult::from_result(self.read_messages(args).await),
            GET_CHECKPOINT => InvocationResult::from_result(self.get_checkpoint(args)),
            _ => {
                tracing::warn!("Unknown tool requested: {}", name);
                return Err(DispatchError::UnknownTool(name.to_string()));
            }
        };

        if let InvocationResult::Error(message) = &outcome {
            tracing::debug!("{} returned error: {}", name, message);
        }
        Ok(outcome)
    }

    pub fn list_sources(&self, args: &Arguments) -> ToolResult<ListSourcesResponse> {
        expect_no_arguments(args)?;
        tracing::info!("list_sources: {} configured", self.allowlist.len());

        Ok(ListSourcesResponse {
            sources: self.allowlist.sources().to_vec(),
        })
    }

    pub async fn read_messages(&self, args: &Arguments) -> ToolResult<ReadMessagesResponse> {
        let params = ReadMessagesParams::from_arguments(args)?;
        self.read(params).await
    }

    /// Allowlist check, one scoped upstream fetch, then normalization
    pub async fn read(&self, params: ReadMessagesParams) -> ToolResult<ReadMessagesResponse> {
        tracing::info!(
            "read_messages: source={}, limit={}",
            params.source,
            params.limit
        );

        if let Err(denied) = self.allowlist.check(&params.source) {
            tracing::warn!("read_messages: source {} denied by allowlist", params.source);
            return Err(denied.into());
        }

        let raw = fetch_scoped(self.upstream.as_ref(), &params.source, params.limit)
            .await
            .map_err(|e| {
                tracing::error!("read_messages: upstream failed: {}", e);
                e
            })?;

        let messages = normalize(raw);
        tracing::info!(
            "read_messages: {} text messages from {}",
            messages.len(),
            params.source
        );

        Ok(ReadMessagesResponse {
            source: params.source,
            messages,
        })
    }

    /// Checkpoints are not persisted; the answer is always `null`
    pub fn get_checkpoint(&self, args: &Arguments) -> ToolResult<CheckpointResponse> {
        let params = CheckpointParams::from_arguments(args)?;
        tracing::info!("get_checkpoint: source={}", params.source);

        Ok(CheckpointResponse {
            source: params.source,
            last_message_id: None,
        })
    }
}
