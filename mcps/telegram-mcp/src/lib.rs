//! Telegram MCP Library
//!
//! Read-only access to Telegram channels and groups over MCP, gated by a
//! source allowlist.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use telegram_mcp::{Config, TelegramMcpServer};
//!
//! let config = Config::load()?;
//! let server = TelegramMcpServer::from_config(&config);
//! // Serve via stdio, or call tools in-process through `EmbeddableMcp`
//! ```

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod normalize;
pub mod params;
pub mod policy;
pub mod server;
pub mod types;
pub mod upstream;

// Re-export main server type
pub use server::TelegramMcpServer;

pub use config::Config;
pub use dispatch::{Dispatcher, InvocationResult};
pub use policy::{Allowlist, Authorization};
pub use types::*;
