//! Telegram MCP - Read-only Telegram server over stdio
//!
//! Exposes `list_sources`, `read_messages` and `get_checkpoint`. Reads are
//! restricted to the sources in `ALLOWLIST_SOURCES` when it is set.

use clap::Parser;
use telegram_mcp::{Config, TelegramMcpServer};

#[derive(Parser)]
#[command(name = "telegram-mcp")]
#[command(about = "Run the Telegram MCP server (stdio)")]
struct Cli {
    /// Use stdio transport (the default and only transport)
    #[arg(long)]
    stdio: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    mcp_common::init_tracing("telegram_mcp")?;

    tracing::info!("Starting Telegram MCP Server");

    let config = Config::load()?;
    tracing::info!(
        "Session file: {}, allowlist entries: {}",
        config.session_path.display(),
        config.allowlist.len()
    );
    if config.allowlist.is_open() {
        tracing::warn!("ALLOWLIST_SOURCES is empty: every source can be read");
    }

    let server = TelegramMcpServer::from_config(&config);
    mcp_common::serve_stdio(server).await
}
