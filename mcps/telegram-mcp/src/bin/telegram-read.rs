//! Read text-only messages from an allowlisted Telegram source
//!
//! Prints `{source, messages}` as JSON on stdout, or `Error: <message>` on
//! stderr with a non-zero exit status.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use telegram_mcp::params::{ReadMessagesParams, DEFAULT_LIMIT};
use telegram_mcp::upstream::TelegramSource;
use telegram_mcp::{Config, Dispatcher};

#[derive(Parser)]
#[command(name = "telegram-read")]
#[command(about = "Read text-only messages from an allowlisted Telegram source.")]
struct Cli {
    /// Channel/group username or ID
    #[arg(long)]
    source: String,

    /// Number of most recent messages to fetch
    #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    limit: i64,
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = Config::load()?;
    let dispatcher = Dispatcher::new(
        config.allowlist.clone(),
        Arc::new(TelegramSource::new(&config)),
    );

    let params = ReadMessagesParams::new(&cli.source, cli.limit)?;
    let response = dispatcher.read(params).await?;
    Ok(serde_json::to_string_pretty(&response)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = mcp_common::init_tracing_at("telegram_mcp", "warn") {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(payload) => {
            println!("{}", payload);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
