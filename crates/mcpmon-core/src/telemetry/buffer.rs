//! Bounded, ordered, in-memory event buffer
//!
//! `max_size` is a flush trigger, not a cap: events added between a caller
//! observing [`EventBuffer::is_full`] and the flush that follows still land in
//! the buffer, so `size()` can transiently exceed `max_size`. Only the
//! optional hard limit rejects events.

use crate::error::{MonitorError, MonitorResult};
use crate::event::ToolCallEvent;
use parking_lot::Mutex;

#[derive(Debug)]
pub struct EventBuffer {
    events: Mutex<Vec<ToolCallEvent>>,
    max_size: usize,
    hard_limit: Option<usize>,
}

impl EventBuffer {
    /// Buffer that reports full at `max_size` events
    pub fn new(max_size: usize) -> Self {
        Self {
            events: Mutex::new(Vec::with_capacity(max_size)),
            max_size,
            hard_limit: None,
        }
    }

    /// Buffer that also refuses events once `hard_limit` are pending
    pub fn with_hard_limit(max_size: usize, hard_limit: usize) -> Self {
        Self {
            hard_limit: Some(hard_limit.max(max_size)),
            ..Self::new(max_size)
        }
    }

    /// Append to the tail
    pub fn add(&self, event: ToolCallEvent) {
        self.events.lock().push(event);
    }

    /// Append unless the hard limit is reached
    pub fn try_add(&self, event: ToolCallEvent) -> MonitorResult<()> {
        let mut events = self.events.lock();
        if let Some(limit) = self.hard_limit {
            if events.len() >= limit {
                return Err(MonitorError::BufferOverflow {
                    capacity: limit,
                    pending: events.len(),
                });
            }
        }
        events.push(event);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.events.lock().len() >= self.max_size
    }

    /// Take everything buffered, leaving a fresh empty buffer behind
    ///
    /// The returned batch owns its storage; events added afterwards go to the
    /// new buffer and are neither visible in the batch nor lost.
    pub fn flush(&self) -> Vec<ToolCallEvent> {
        let mut events = self.events.lock();
        std::mem::replace(&mut *events, Vec::with_capacity(self.max_size))
    }

    /// Copy of the pending events
    pub fn pending(&self) -> Vec<ToolCallEvent> {
        self.events.lock().clone()
    }

    pub fn size(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all pending events
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn hard_limit(&self) -> Option<usize> {
        self.hard_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(name: &str) -> ToolCallEvent {
        ToolCallEvent::success(name, Utc::now(), 1, 1, 1)
    }

    #[test]
    fn test_fullness_trigger() {
        let buffer = EventBuffer::new(3);
        buffer.add(event("a"));
        buffer.add(event("b"));
        assert!(!buffer.is_full());

        buffer.add(event("c"));
        assert!(buffer.is_full());

        // Soft trigger: adding past max_size is allowed
        buffer.add(event("d"));
        assert_eq!(buffer.size(), 4);
    }

    #[test]
    fn test_flush_preserves_order_and_detaches() {
        let buffer = EventBuffer::new(10);
        for name in ["a", "b", "c"] {
            buffer.add(event(name));
        }

        let batch = buffer.flush();
        buffer.add(event("d"));

        let names: Vec<_> = batch.iter().map(|e| e.tool_name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(buffer.size(), 1);
        assert_eq!(buffer.pending()[0].tool_name, "d");
    }

    #[test]
    fn test_pending_is_non_destructive() {
        let buffer = EventBuffer::new(10);
        buffer.add(event("a"));

        assert_eq!(buffer.pending().len(), 1);
        assert_eq!(buffer.size(), 1);

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.flush().is_empty());
    }

    #[test]
    fn test_hard_limit() {
        let buffer = EventBuffer::with_hard_limit(2, 3);
        for name in ["a", "b", "c"] {
            buffer.try_add(event(name)).unwrap();
        }

        let err = buffer.try_add(event("d")).unwrap_err();
        assert_eq!(
            err,
            MonitorError::BufferOverflow {
                capacity: 3,
                pending: 3
            }
        );

        buffer.flush();
        assert!(buffer.try_add(event("e")).is_ok());
    }

    #[test]
    fn test_hard_limit_never_below_trigger() {
        let buffer = EventBuffer::with_hard_limit(5, 2);
        assert_eq!(buffer.hard_limit(), Some(5));
    }
}
