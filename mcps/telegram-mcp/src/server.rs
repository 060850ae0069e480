//! MCP Server implementation for read-only Telegram access
//!
//! This module adapts the [`Dispatcher`] to the MCP protocol. The tool
//! catalog is advertised verbatim; every call goes through the dispatcher
//! and comes back as a structured success or an `isError` envelope, unknown
//! tool names included.

use std::future::Future;
use std::sync::Arc;

use mcp_common::{
    async_trait, error_result, internal_error, CallToolResult, EmbeddableError, EmbeddableMcp,
    EmbeddableResult, McpError, McpResult, Tool,
};
use rmcp::{
    model::{
        CallToolRequestParam, ListToolsResult, PaginatedRequestParam, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    ServerHandler,
};
use serde_json::Value;

use crate::catalog;
use crate::config::Config;
use crate::dispatch::{Dispatcher, InvocationResult};
use crate::params::Arguments;
use crate::types::DispatchError;
use crate::upstream::TelegramSource;

/// The Telegram MCP Server
#[derive(Clone)]
pub struct TelegramMcpServer {
    dispatcher: Dispatcher,
    tools: Arc<Vec<Tool>>,
}

impl TelegramMcpServer {
    /// Create a server around an existing dispatcher
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            tools: Arc::new(catalog::tools()),
        }
    }

    /// Create a server reading from Telegram with the configured allowlist
    pub fn from_config(config: &Config) -> Self {
        let upstream = Arc::new(TelegramSource::new(config));
        Self::new(Dispatcher::new(config.allowlist.clone(), upstream))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    async fn invoke(&self, name: &str, args: &Arguments) -> CallToolResult {
        match self.dispatcher.dispatch(name, args).await {
            Ok(outcome) => outcome.into_call_tool_result(),
            Err(e) => error_result(e.to_string()),
        }
    }

    /// Run one invocation unless `cancelled` resolves first
    ///
    /// Losing the race drops the dispatch future, and with it any open
    /// upstream session.
    async fn invoke_until<F>(
        &self,
        name: &str,
        args: &Arguments,
        cancelled: F,
    ) -> McpResult<CallToolResult>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.invoke(name, args) => Ok(result),
            _ = cancelled => {
                tracing::info!("{} cancelled by client", name);
                Err(internal_error("request cancelled"))
            }
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl ServerHandler for TelegramMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only Telegram MCP server. \
                 Use list_sources to see which sources are allowlisted, \
                 then read_messages to fetch recent text messages oldest-first."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        self.invoke_until(&request.name, &arguments, context.ct.cancelled())
            .await
    }
}

// ============================================================================
// Embeddable Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for TelegramMcpServer {
    fn server_name(&self) -> &str {
        "telegram"
    }

    fn server_description(&self) -> Option<&str> {
        Some("Read-only Telegram MCP server with source allowlisting.")
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tools.as_ref().clone()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        let args = match params {
            Value::Null => Arguments::new(),
            Value::Object(map) => map,
            other => {
                return Err(EmbeddableError::InvalidParams(format!(
                    "expected an object, got {}",
                    other
                )))
            }
        };

        match self.dispatcher.dispatch(name, &args).await {
            Ok(outcome) => Ok(outcome.into_call_tool_result()),
            Err(DispatchError::UnknownTool(name)) => Err(EmbeddableError::ToolNotFound(name)),
        }
    }
}
