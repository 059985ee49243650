//! Error types.
//!
//! The binding side of the crate fails at compile time by design (a callback
//! that cannot bind to a payload is rejected by trait resolution, not at
//! runtime), so the runtime error surface is small:
//!
//! - [`QueueError`] — errors raised by a bounded [`TaskQueue`](crate::TaskQueue).

use thiserror::Error;

/// # Errors produced by a bounded task queue.
///
/// [`QueuedPolicy`](crate::QueuedPolicy) itself never surfaces these — a
/// policy drops the task and counts it instead, so `publish` stays
/// infallible — but [`TaskQueue::try_push`](crate::TaskQueue::try_push)
/// reports them to callers that enqueue work directly.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum QueueError {
    /// The queue is at capacity; the task was not enqueued.
    #[error("task queue full (capacity {capacity})")]
    Full {
        /// The configured queue capacity.
        capacity: usize,
    },
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Full { .. } => "queue_full",
        }
    }
}
