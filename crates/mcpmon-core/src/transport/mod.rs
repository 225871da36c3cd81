//! Batch delivery
//!
//! A [`Transport`] delivers one batch of events per call. Implementations do
//! their own retrying and failure isolation; callers only see success or a
//! single terminal error.

mod http;

pub use http::{API_KEY_HEADER, HttpTransport};

use crate::error::MonitorResult;
use crate::event::ToolCallEvent;
use async_trait::async_trait;

/// Delivers batches of tool call events to a collector
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one batch, in order
    async fn send(&self, events: &[ToolCallEvent]) -> MonitorResult<()>;

    /// Short name used in log fields
    fn name(&self) -> &str {
        "transport"
    }
}
