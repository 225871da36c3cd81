//! mcpmon SDK
//!
//! A tool server whose every tool call is instrumented and shipped to a
//! metrics collector. Telemetry is fail-open: delivery problems are logged
//! and never change what a tool call returns.
//!
//! # Example
//!
//! ```rust,no_run
//! use mcpmon_sdk::{MonitorOptions, MonitoredServer, ServerInfo, ToolError};
//! use serde_json::{Value, json};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = MonitoredServer::new(
//!     ServerInfo::new("calculator", "0.1.0"),
//!     MonitorOptions::new("k".repeat(64)),
//! )?;
//!
//! server.register_tool("add", "Add two numbers", |args: Value| async move {
//!     let a = args["a"].as_i64().ok_or_else(|| ToolError::invalid_arguments("a"))?;
//!     let b = args["b"].as_i64().ok_or_else(|| ToolError::invalid_arguments("b"))?;
//!     Ok::<_, ToolError>(json!({ "sum": a + b }))
//! })?;
//!
//! let result = server.call_tool("add", json!({ "a": 1, "b": 2 })).await?;
//! assert_eq!(result["sum"], 3);
//!
//! server.close().await;
//! # Ok(())
//! # }
//! ```

pub mod server;
pub mod write_queue;

pub use server::{MonitoredServer, ServerInfo, ToolDescriptor, ToolError, ToolHandler};
pub use write_queue::{WriteQueue, WriteQueueError};

// Re-export commonly used types from core
pub use mcpmon_core::{
    config::{MonitorOptions, ValidatedMonitorOptions},
    error::{MonitorError, MonitorResult},
    event::ToolCallEvent,
    telemetry::{CollectorStats, FlushOutcome, MetricsCollector, SharedMetricsCollector},
    transport::{HttpTransport, Transport},
};
