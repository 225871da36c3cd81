//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use mcpmon_core::logging::LogFormat;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let log_format: LogFormat = cli.log_format.into();

    match cli.command {
        Commands::CheckConfig { config } => commands::config::check(config.as_deref()).await,
        Commands::Validate { file } => commands::events::validate(&file).await,
        Commands::Replay { file, config } => {
            commands::events::replay(&file, config.as_deref(), log_format).await
        }
        Commands::DemoTodo { store, config } => {
            commands::demo::run(&store, config.as_deref(), log_format).await
        }
    }
}
