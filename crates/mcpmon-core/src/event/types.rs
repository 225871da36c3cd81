//! Tool call event record

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One record per instrumented invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallEvent {
    /// Unique per invocation, never reused
    pub call_id: String,
    /// Name of the instrumented operation
    pub tool_name: String,
    /// Invocation start time, RFC 3339 UTC
    pub timestamp: String,
    /// Wall-clock duration in milliseconds
    pub duration: u64,
    /// Serialized input size in bytes, 0 if unserializable
    pub input_size: u64,
    /// Serialized output size in bytes, success only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
    /// True iff the wrapped call returned without error
    pub success: bool,
    /// Error message, failure only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error source chain, failure only and when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_stack: Option<String>,
}

impl ToolCallEvent {
    /// Build a success event
    pub fn success(
        tool_name: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        input_size: u64,
        output_size: u64,
    ) -> Self {
        Self {
            call_id: new_call_id(),
            tool_name: tool_name.into(),
            timestamp: format_timestamp(started_at),
            duration: duration_ms,
            input_size,
            output_size: Some(output_size),
            success: true,
            error: None,
            error_stack: None,
        }
    }

    /// Build a failure event
    pub fn failure(
        tool_name: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        input_size: u64,
        error: impl Into<String>,
        error_stack: Option<String>,
    ) -> Self {
        Self {
            call_id: new_call_id(),
            tool_name: tool_name.into(),
            timestamp: format_timestamp(started_at),
            duration: duration_ms,
            input_size,
            output_size: None,
            success: false,
            error: Some(error.into()),
            error_stack,
        }
    }

    /// Override the generated call id
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = call_id.into();
        self
    }
}

/// Generate a fresh call id
pub(crate) fn new_call_id() -> String {
    Uuid::new_v4().to_string()
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
