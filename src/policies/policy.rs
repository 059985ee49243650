//! # Execution policy contract.
//!
//! An [`ExecutionPolicy`] decides *how* an adapted callback actually runs
//! once a signal has decided *that* it should run. The signal hands the
//! policy a ready-to-run [`Task`] that owns everything it needs — callback,
//! arguments, panic-handler snapshot — so a policy is free to run it inline,
//! park it on a queue, or move it to another thread.
//!
//! ## Rules
//! - Dispatch within one `publish` stays sequential for the synchronous
//!   built-in; a custom policy that defers takes over responsibility for
//!   when (and on which thread) the task runs.
//! - The library never schedules deferred tasks itself — it only classifies
//!   policies via [`ExecutionPolicy::is_synchronous`].
//! - A policy instance belongs to exactly one subscription; `connect_via`
//!   takes it by value.

/// A ready-to-run unit of dispatch: the adapted callback closed over its
/// owned arguments and its panic-handler snapshot.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Strategy controlling how an adapted callback runs.
///
/// # Example
/// ```rust
/// use sigcast::{ExecutionPolicy, Task};
///
/// /// Runs tasks inline but counts them first.
/// struct Counting(std::sync::atomic::AtomicUsize);
///
/// impl ExecutionPolicy for Counting {
///     fn execute(&self, task: Task) {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///         task();
///     }
///
///     fn is_synchronous(&self) -> bool {
///         true
///     }
/// }
/// ```
pub trait ExecutionPolicy: Send + Sync + 'static {
    /// Runs or defers one task.
    ///
    /// The task owns its arguments, so it stays valid after `publish`
    /// returns; a deferring policy only needs to keep it somewhere.
    fn execute(&self, task: Task);

    /// Whether the policy runs tasks on the publishing thread, inside the
    /// `publish` call.
    ///
    /// This classifies the policy for callers (and tests); the dispatch
    /// path hands out owned tasks either way.
    fn is_synchronous(&self) -> bool;
}

/// The built-in default policy: runs the callback immediately, on the
/// publishing thread, in subscription order.
#[derive(Clone, Copy, Debug, Default)]
pub struct SynchronousPolicy;

impl ExecutionPolicy for SynchronousPolicy {
    fn execute(&self, task: Task) {
        task()
    }

    fn is_synchronous(&self) -> bool {
        true
    }
}

/// Per-subscription policy storage.
///
/// The default synchronous policy is held unboxed so the common path pays
/// no allocation and no virtual call; everything else goes through the
/// trait object.
pub(crate) enum PolicyCell {
    Synchronous,
    Custom(Box<dyn ExecutionPolicy>),
}

impl PolicyCell {
    pub(crate) fn custom<P: ExecutionPolicy>(policy: P) -> Self {
        PolicyCell::Custom(Box::new(policy))
    }
}
