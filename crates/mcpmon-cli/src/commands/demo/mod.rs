//! Demo todo tool server
//!
//! Reads requests from stdin and writes responses to stdout, one JSON object
//! per line. Ctrl-C, SIGTERM or end of input closes the server, which flushes
//! the pending metrics before exiting.

pub mod protocol;
pub mod store;
pub mod tools;

use super::config::load_and_init_logging;
use futures::stream::StreamExt;
use mcpmon_core::logging::LogFormat;
use mcpmon_sdk::{MonitoredServer, ServerInfo};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use std::path::Path;
use std::sync::Arc;
use store::TodoStore;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const SERVER_NAME: &str = "todo-mcp";
pub const SERVER_VERSION: &str = "0.1.0";

/// Run the todo server until stdin closes or a termination signal arrives
pub async fn run(store_path: &Path, config: Option<&Path>, format: LogFormat) -> anyhow::Result<()> {
    let options = load_and_init_logging(config, format)?;
    let server = MonitoredServer::from_validated(ServerInfo::new(SERVER_NAME, SERVER_VERSION), options);

    let store = Arc::new(TodoStore::open_or_empty(store_path).await);
    tools::register_todo_tools(&server, store.clone())?;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let signals_handle = signals.handle();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    tracing::info!(store = %store.path().display(), "Todo server ready");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("Input closed");
                    break;
                };
                if let Some(response) = protocol::handle_line(&server, &line).await {
                    let mut out = serde_json::to_vec(&response)?;
                    out.push(b'\n');
                    stdout.write_all(&out).await?;
                    stdout.flush().await?;
                }
            }
            signal = signals.next() => {
                tracing::info!(signal = ?signal, "Termination signal received");
                break;
            }
        }
    }

    signals_handle.close();
    let outcome = server.close().await;
    store.close().await;
    tracing::info!(outcome = ?outcome, "Todo server stopped");
    Ok(())
}
