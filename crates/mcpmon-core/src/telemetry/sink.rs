//! Destination for events produced by the wrapper

use crate::event::ToolCallEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// Receives one event per instrumented invocation
///
/// Implementations must absorb their own failures: recording never fails
/// from the caller's point of view.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn record(&self, event: ToolCallEvent);
}

#[async_trait]
impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    async fn record(&self, event: ToolCallEvent) {
        (**self).record(event).await
    }
}
