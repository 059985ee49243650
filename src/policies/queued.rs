//! # Deferred dispatch through a drainable queue.
//!
//! [`TaskQueue`] is a bounded FIFO of captured dispatch tasks;
//! [`QueuedPolicy`] is the execution policy that feeds it. Together they
//! give a signal "publish now, run later" semantics without the library
//! owning a thread: whoever drives the application loop calls
//! [`TaskQueue::run_pending`] at a point of its choosing.
//!
//! ## Overflow behavior
//! 1) The new task is **dropped** for this queue only,
//! 2) the drop is counted ([`TaskQueue::dropped`]),
//! 3) other subscriptions (and other queues) are unaffected.
//!
//! The capacity is clamped to a minimum of 1.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use sigcast::{Signal, SourceExt, TaskQueue};
//!
//! let queue = TaskQueue::bounded(64);
//! let signal = Signal::<(i32,)>::new();
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&hits);
//! signal.source().connect_via(
//!     move |_: i32| {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     },
//!     queue.policy(),
//! );
//!
//! signal.publish((1,));
//! assert_eq!(hits.load(Ordering::Relaxed), 0); // captured, not run
//!
//! assert_eq!(queue.run_pending(), 1);
//! assert_eq!(hits.load(Ordering::Relaxed), 1);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::QueueError;
use crate::sync::lock;

use super::policy::{ExecutionPolicy, Task};

struct QueueInner {
    tasks: Mutex<VecDeque<Task>>,
    capacity: usize,
    dropped: AtomicUsize,
}

impl QueueInner {
    fn push(&self, task: Task) -> Result<(), QueueError> {
        let mut tasks = lock(&self.tasks);
        if tasks.len() >= self.capacity {
            return Err(QueueError::Full {
                capacity: self.capacity,
            });
        }
        tasks.push_back(task);
        Ok(())
    }
}

/// Bounded FIFO of deferred dispatch tasks, drained by the caller.
pub struct TaskQueue {
    inner: Arc<QueueInner>,
}

impl TaskQueue {
    /// Creates a queue holding at most `capacity` pending tasks.
    ///
    /// The capacity is clamped to a minimum of 1.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                tasks: Mutex::new(VecDeque::new()),
                capacity: capacity.max(1),
                dropped: AtomicUsize::new(0),
            }),
        }
    }

    /// Mints a policy feeding this queue.
    ///
    /// Every subscription takes its own policy value; policies minted from
    /// the same queue share it.
    #[must_use]
    pub fn policy(&self) -> QueuedPolicy {
        QueuedPolicy {
            queue: Arc::clone(&self.inner),
        }
    }

    /// Enqueues a task directly, surfacing overflow as an error.
    pub fn try_push(&self, task: Task) -> Result<(), QueueError> {
        self.inner.push(task)
    }

    /// Runs every task currently pending, in FIFO order, on the calling
    /// thread. Returns how many ran.
    ///
    /// Tasks enqueued *while* draining (e.g. by a callback that publishes
    /// to a signal wired back into this queue) are picked up in the same
    /// call. A panicking task propagates to the caller; the remaining
    /// tasks stay queued.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Pop outside of task(): a task may re-enter the queue.
            let Some(task) = lock(&self.inner.tasks).pop_front() else {
                return ran;
            };
            ran += 1;
            task();
        }
    }

    /// Number of tasks currently pending.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner.tasks).len()
    }

    /// True if no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tasks dropped on overflow since the queue was created.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.inner.dropped.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("len", &self.len())
            .field("capacity", &self.inner.capacity)
            .field("dropped", &self.dropped())
            .finish()
    }
}

/// Execution policy that parks tasks on a [`TaskQueue`].
///
/// On overflow the task is dropped for this queue only and counted; the
/// publish itself never fails.
#[derive(Clone)]
pub struct QueuedPolicy {
    queue: Arc<QueueInner>,
}

impl ExecutionPolicy for QueuedPolicy {
    fn execute(&self, task: Task) {
        if self.queue.push(task).is_err() {
            self.queue.dropped.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "tracing")]
            tracing::warn!(capacity = self.queue.capacity, "task queue full, dropping task");
        }
    }

    fn is_synchronous(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use crate::{Signal, SourceExt};

    use super::*;

    #[test]
    fn test_tasks_are_captured_not_run() {
        let queue = TaskQueue::bounded(8);
        let signal = Signal::<(i32,)>::new();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        signal
            .source()
            .connect_via(move |v: i32| sink.lock().unwrap().push(v), queue.policy());

        signal.publish((1,));
        signal.publish((2,));
        assert!(seen.lock().unwrap().is_empty(), "nothing runs before drain");
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.run_pending(), 2);
        assert_eq!(seen.lock().unwrap().as_slice(), [1, 2], "FIFO drain order");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_arguments_are_owned_by_the_task() {
        let queue = TaskQueue::bounded(8);
        let signal = Signal::<(String,)>::new();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        signal
            .source()
            .connect_via(move |s: String| sink.lock().unwrap().push(s), queue.policy());

        {
            let transient = "short-lived".to_string();
            signal.publish((transient,));
        }
        assert_eq!(queue.run_pending(), 1);
        assert_eq!(seen.lock().unwrap().as_slice(), ["short-lived".to_string()]);
    }

    #[test]
    fn test_overflow_drops_and_counts() {
        let queue = TaskQueue::bounded(1);
        let signal = Signal::<(i32,)>::new();

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        signal.source().connect_via(
            move |_: i32| {
                counter.fetch_add(1, Ordering::Relaxed);
            },
            queue.policy(),
        );

        signal.publish((1,));
        signal.publish((2,)); // over capacity: dropped
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dropped(), 1);

        queue.run_pending();
        assert_eq!(hits.load(Ordering::Relaxed), 1, "only the first publish ran");
    }

    #[test]
    fn test_single_shot_detaches_at_publish_not_at_drain() {
        let queue = TaskQueue::bounded(8);
        let signal = Signal::<(i32,)>::new();

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        signal.source().connect_once_via(
            move |_: i32| {
                counter.fetch_add(1, Ordering::Relaxed);
            },
            queue.policy(),
        );

        signal.publish((1,));
        assert_eq!(signal.subscriptions(), 0, "single-shot detaches at publish time");
        signal.publish((2,));

        assert_eq!(queue.run_pending(), 1);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_capacity_clamped_to_one() {
        let queue = TaskQueue::bounded(0);
        assert!(queue.try_push(Box::new(|| {})).is_ok());
        let err = queue.try_push(Box::new(|| {})).unwrap_err();
        assert_eq!(err.as_label(), "queue_full");
    }

    #[test]
    fn test_policy_is_not_synchronous() {
        let queue = TaskQueue::bounded(1);
        assert!(!queue.policy().is_synchronous());
    }
}
