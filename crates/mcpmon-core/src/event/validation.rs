//! Event payload validation
//!
//! Mirrors the schema the collector server applies on ingest. Validation
//! never coerces: a malformed event is reported with the offending field.

use super::types::ToolCallEvent;
use crate::error::{MonitorError, MonitorResult};
use chrono::DateTime;

/// Validator for tool call events
#[derive(Debug, Clone, Default)]
pub struct EventValidator {
    /// Reject batches with no events
    pub reject_empty_batch: bool,
}

impl EventValidator {
    /// Validator with the collector server's rules
    pub fn strict() -> Self {
        Self {
            reject_empty_batch: true,
        }
    }

    /// Validate a single event
    pub fn validate(&self, event: &ToolCallEvent) -> MonitorResult<()> {
        if event.call_id.trim().is_empty() {
            return Err(MonitorError::validation_field("callId", "callId must not be empty"));
        }
        if event.tool_name.trim().is_empty() {
            return Err(MonitorError::validation_field(
                "toolName",
                "toolName must not be empty",
            ));
        }
        if DateTime::parse_from_rfc3339(&event.timestamp).is_err() {
            return Err(MonitorError::validation_field(
                "timestamp",
                format!("timestamp is not RFC 3339: {}", event.timestamp),
            ));
        }

        match (event.success, &event.error) {
            (true, Some(_)) => {
                return Err(MonitorError::validation_field(
                    "error",
                    "error must be absent when success is true",
                ));
            }
            (false, None) => {
                return Err(MonitorError::validation_field(
                    "error",
                    "error is required when success is false",
                ));
            }
            _ => {}
        }

        if !event.success && event.output_size.is_some() {
            return Err(MonitorError::validation_field(
                "outputSize",
                "outputSize must be absent when success is false",
            ));
        }
        if event.success && event.error_stack.is_some() {
            return Err(MonitorError::validation_field(
                "errorStack",
                "errorStack must be absent when success is true",
            ));
        }

        Ok(())
    }

    /// Validate a batch, reporting the index of the first bad event
    pub fn validate_batch(&self, events: &[ToolCallEvent]) -> MonitorResult<()> {
        if self.reject_empty_batch && events.is_empty() {
            return Err(MonitorError::validation("No events provided"));
        }

        for (index, event) in events.iter().enumerate() {
            self.validate(event).map_err(|e| match e {
                MonitorError::Validation { message, field } => MonitorError::Validation {
                    message: format!("event {}: {}", index, message),
                    field,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl ToolCallEvent {
    /// Validate this event with the default rules
    pub fn validate(&self) -> MonitorResult<()> {
        EventValidator::default().validate(self)
    }
}

/// Parse and validate a JSON array of events
pub fn parse_event_batch(json: &str) -> MonitorResult<Vec<ToolCallEvent>> {
    let events: Vec<ToolCallEvent> = serde_json::from_str(json)
        .map_err(|e| MonitorError::validation(format!("malformed event batch: {}", e)))?;
    EventValidator::strict().validate_batch(&events)?;
    Ok(events)
}
