//! Smoke-test the Telegram MCP server over stdio
//!
//! Spawns the server, lists its tools, calls `list_sources`, and optionally
//! `read_messages` for one source.

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{model::CallToolRequestParam, transport::TokioChildProcess, ServiceExt};
use serde_json::{json, Value};
use tokio::process::Command;

#[derive(Parser)]
#[command(name = "telegram-mcp-smoke")]
#[command(about = "Smoke-test the Telegram MCP server over stdio.")]
struct Cli {
    /// Optional source to call read_messages on (must be allowlisted)
    #[arg(long)]
    source: Option<String>,

    /// Message limit for read_messages
    #[arg(long, default_value_t = 5)]
    limit: i64,

    /// Server executable to spawn
    #[arg(long, default_value = "telegram-mcp")]
    command: String,
}

fn describe(result: &rmcp::model::CallToolResult) -> String {
    match &result.structured_content {
        Some(value) => value.to_string(),
        None => mcp_common::result_text(result),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let transport = TokioChildProcess::new(Command::new(&cli.command))
        .with_context(|| format!("Failed to spawn {}", cli.command))?;
    let service = ().serve(transport).await.context("Failed to initialize session")?;

    let tools = service
        .list_tools(Default::default())
        .await
        .context("Failed to list tools")?;
    let names: Vec<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
    println!("tools: {:?}", names);

    let sources = service
        .call_tool(CallToolRequestParam {
            name: "list_sources".into(),
            arguments: None,
            task: None,
        })
        .await
        .context("list_sources failed")?;
    println!("list_sources: {}", describe(&sources));

    if let Some(source) = cli.source {
        let arguments = match json!({ "source": source, "limit": cli.limit }) {
            Value::Object(map) => Some(map),
            _ => None,
        };
        let messages = service
            .call_tool(CallToolRequestParam {
                name: "read_messages".into(),
                arguments,
                task: None,
            })
            .await
            .context("read_messages failed")?;
        println!("read_messages: {}", describe(&messages));
    }

    service.cancel().await?;
    Ok(())
}
