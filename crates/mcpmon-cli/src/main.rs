//! mcpmon command-line interface
//!
//! ```bash
//! mcpmon check-config --config monitor.toml
//! mcpmon validate events.json
//! mcpmon replay events.json
//! mcpmon demo-todo --store todos.json
//! ```
//!
//! Options come from the environment (`MCP_API_KEY`, `METRICS_SERVER_URL`,
//! `LOG_LEVEL`, ...), optionally overridden by a `--config` file. Logs go to
//! stderr; stdout carries command output.

mod args;
mod commands;
mod router;

use clap::Parser;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
