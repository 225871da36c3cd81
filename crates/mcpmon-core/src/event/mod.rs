//! Tool call events
//!
//! A [`ToolCallEvent`] is the single record produced per instrumented
//! invocation. Field names on the wire are camelCase and must stay exactly as
//! the collector server expects them.

mod types;
mod validation;

pub use types::ToolCallEvent;
pub use validation::{EventValidator, parse_event_batch};
