//! Server initialization utilities
//!
//! Provides standardized tracing setup and the stdio serving loop shared by
//! every server binary in the workspace.

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Sets up logging to stderr (stdout is reserved for MCP protocol) with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG
/// - Default log level of `info` for the specified crate
///
/// Set `LOG_FORMAT=json` for structured JSON output (useful for production/log aggregation).
/// Default is human-readable text output.
///
/// # Arguments
///
/// * `crate_name` - The name of the MCP server crate (e.g., "telegram_mcp")
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("telegram_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    init_tracing_at(crate_name, "info")
}

/// Initialize tracing with `level` as the crate's default instead of `info`
///
/// Command-line tools that own stdout and keep stderr for their own error
/// line use this with `warn`. `RUST_LOG` still applies on top.
pub fn init_tracing_at(crate_name: &str, level: &str) -> anyhow::Result<()> {
    let directive = crate_directive(crate_name, level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn crate_directive(crate_name: &str, level: &str) -> String {
    format!("{}={}", crate_name, level)
}

/// Serve an MCP handler over stdin/stdout until the peer closes the stream
///
/// Tracing must already be initialized; configuration loading belongs to the
/// caller so that a fatal configuration error never reaches the transport.
///
/// # Example
///
/// ```rust,ignore
/// let server = MyMcpServer::new(config);
/// mcp_common::serve_stdio(server).await?;
/// ```
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn test_crate_directive() {
        assert_eq!(crate_directive("telegram_mcp", "warn"), "telegram_mcp=warn");
        assert_eq!(crate_directive("telegram_mcp", "info"), "telegram_mcp=info");
        assert!(crate_directive("telegram_mcp", "warn")
            .parse::<Directive>()
            .is_ok());
    }
}
