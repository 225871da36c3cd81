//! mcpmon
//!
//! Fail-open telemetry for tool servers. This package re-exports the SDK;
//! the pipeline internals are in [`mcpmon_core`].

pub use mcpmon_core;
pub use mcpmon_sdk::*;
