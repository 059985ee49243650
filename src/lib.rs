//! # sigcast
//!
//! **Sigcast** is a typed, in-process publish/subscribe library for Rust.
//!
//! Producers declare strongly-typed signals; consumers attach callbacks that
//! receive the signal's payload on every publish. The crate is designed as a
//! building block for event-driven objects: subscriptions survive concurrent
//! mutation and teardown, payloads can be reshaped through composable
//! pipelines, and a callback taking fewer (or convertible) parameters than
//! the signal emits still binds automatically.
//!
//! ## Architecture
//! ```text
//!     Signal<A> ── publish(args) ──► snapshot of subscription states
//!         │                              │ (copy-on-write, taken once,
//!         │                              │  never locked during dispatch)
//!         │ connect / connect_once       ▼
//!         │                         SubscriptionState
//!         │                           - adapted callback
//!         │                           - suspended / single-shot flags
//!         │                           - panic handlers
//!         │                           - execution policy
//!         ▼                              │
//!     Connection (weak handle)           ▼
//!       disconnect / suspend /      ExecutionPolicy::execute
//!       resume / add_panic_handler    (inline, queued, spawned, ...)
//!         ▲
//!         │ tracked by
//!     LifetimeGuard ── drop ──► severs every tracked subscription
//! ```
//!
//! ## Features
//! | Area            | Description                                                    | Key types / traits                      |
//! |-----------------|----------------------------------------------------------------|-----------------------------------------|
//! | **Signals**     | Typed publish points with copy-on-write subscriber storage.    | [`Signal`], [`SignalSource`]            |
//! | **Handles**     | Weak subscription handles; all operations on dead state no-op. | [`Connection`], [`ScopedConnection`]    |
//! | **Guards**      | Auto-disconnect subscriptions when their owner goes away.      | [`LifetimeGuard`], [`Inhibitor`]        |
//! | **Adaptation**  | Bind callbacks over a converted prefix of the payload.         | [`SlotFn`], [`Narrow`], [`Payload`]     |
//! | **Policies**    | Decide how an adapted callback actually runs.                  | [`ExecutionPolicy`], [`TaskQueue`]      |
//! | **Pipelines**   | Reshape payloads between a source and a subscription.          | [`SourceExt`], [`Chainable`], [`Chain`] |
//!
//! ## Optional features
//! - `tracing`: emit `tracing` events on connect/disconnect/publish and
//!   queue overflow.
//! - `tokio`: exports `SpawnPolicy`, an execution policy that hands
//!   callbacks to a Tokio runtime.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use sigcast::{Signal, SourceExt};
//!
//! let thermometer = Signal::<(i32, String)>::new();
//! let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
//!
//! // Binds the full payload.
//! let sink = Arc::clone(&seen);
//! thermometer.source().connect(move |degrees: i32, city: String| {
//!     sink.lock().unwrap().push(format!("{city}: {degrees}"));
//! });
//!
//! // Binds a converted prefix: the trailing String is dropped and the
//! // leading i32 arrives as f64.
//! let sink = Arc::clone(&seen);
//! thermometer.source().connect(move |degrees: f64| {
//!     sink.lock().unwrap().push(format!("{degrees:.1}"));
//! });
//!
//! thermometer.publish((21, "Lyon".to_string()));
//!
//! let seen = seen.lock().unwrap();
//! assert_eq!(seen.as_slice(), ["Lyon: 21".to_string(), "21.0".to_string()]);
//! ```

mod adapter;
mod error;
mod guard;
mod pipeline;
mod policies;
mod signal;

// ---- Public re-exports ----

pub use adapter::{Narrow, Payload, Predicate, RawSlot, SlotFn};
pub use error::QueueError;
pub use guard::LifetimeGuard;
pub use pipeline::{
    filter, map, narrow, transform, Bind, Chain, Chainable, Composed, ConnectOptions, FilterStage,
    Forward, MapFn, MapStage, NarrowStage, Source, SourceExt, Stage, Staged, TransformSet,
    TransformStage,
};
pub use policies::{ExecutionPolicy, QueuedPolicy, SynchronousPolicy, Task, TaskQueue};
pub use signal::{Connection, Inhibitor, ScopedConnection, Signal, SignalSource};

// Optional: execution policy backed by a Tokio runtime.
// Enable with: `--features tokio`
#[cfg(feature = "tokio")]
pub use policies::SpawnPolicy;

pub(crate) mod sync {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Locks a mutex, shrugging off poisoning.
    ///
    /// No lock in this crate is held across user callbacks, so a poisoned
    /// mutex carries no torn invariants worth propagating.
    pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
