//! Monitored tool server
//!
//! Tools are registered by name with an async handler taking and returning
//! JSON. Every call through [`MonitoredServer::call_tool`] is instrumented and
//! recorded by the server's metrics collector.

mod error;
mod handler;
mod monitored;
mod types;

pub use error::ToolError;
pub use handler::ToolHandler;
pub use monitored::MonitoredServer;
pub use types::{ServerInfo, ToolDescriptor};
