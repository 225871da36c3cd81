//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use mcpmon_core::logging::LogFormat;
use std::path::PathBuf;

/// Default store for the demo todo server
pub const DEFAULT_TODO_STORE: &str = "todos.json";

#[derive(Parser)]
#[command(name = "mcpmon")]
#[command(about = "mcpmon - fail-open telemetry for tool servers")]
#[command(version)]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate monitor options, then print them
    CheckConfig {
        /// Options file (.json or .toml); overrides the environment
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a file holding a JSON array of tool call events
    Validate {
        /// Events file
        file: PathBuf,
    },

    /// Send the events of a file through the metrics pipeline
    Replay {
        /// Events file
        file: PathBuf,

        /// Options file (.json or .toml); overrides the environment
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a monitored todo tool server over stdin/stdout
    DemoTodo {
        /// File the todos are persisted to
        #[arg(long, default_value = DEFAULT_TODO_STORE)]
        store: PathBuf,

        /// Options file (.json or .toml); overrides the environment
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Pretty,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}
