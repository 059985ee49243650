//! Execution policies.
//!
//! This module groups the knobs that control **how/when** an adapted
//! callback runs once a signal decided it should.
//!
//! ## Contents
//! - [`ExecutionPolicy`] the strategy contract (`execute` + `is_synchronous`)
//! - [`SynchronousPolicy`] the built-in default: inline, in order
//! - [`TaskQueue`] / [`QueuedPolicy`] capture now, drain later
//! - `SpawnPolicy` (feature `tokio`) hand off to a Tokio runtime
//!
//! ## Quick wiring
//! ```text
//! source.connect(cb)                      -> built-in synchronous policy
//! source.connect_via(cb, queue.policy())  -> deferred, queue.run_pending()
//! source.connect_via(cb, custom_policy)   -> whatever execute() decides
//! ```
//!
//! ## Defaults
//! - `connect`/`connect_once` use [`SynchronousPolicy`].
//! - A policy instance is owned by its subscription, never shared.

mod policy;
mod queued;

#[cfg(feature = "tokio")]
mod spawn;

pub use policy::{ExecutionPolicy, SynchronousPolicy, Task};
pub use queued::{QueuedPolicy, TaskQueue};

#[cfg(feature = "tokio")]
pub use spawn::SpawnPolicy;

pub(crate) use policy::PolicyCell;
