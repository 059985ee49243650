//! # Reusable subscription terminals.
//!
//! A [`Bind`] bundles everything a subscription needs besides the source:
//! callback, execution policy, single-shot flag, optional lifetime guard.
//! A stage plus a bind is a [`Chain`] — a fully unbound description that
//! can be applied to any compatible source, each application creating an
//! independent live subscription.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use sigcast::{filter, transform, Bind, Chainable, Signal};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let even_as_text = filter(|n: i32| n % 2 == 0)
//!     .then(transform((|n: i32| n.to_string(),)))
//!     .bind(Bind::new(move |s: String| sink.lock().unwrap().push(s)));
//!
//! // The same chain, applied to two unrelated signals.
//! let first = Signal::<(i32,)>::new();
//! let second = Signal::<(i32,)>::new();
//! even_as_text.apply(&first);
//! even_as_text.apply(&second);
//!
//! first.publish((1,));
//! first.publish((2,));
//! second.publish((4,));
//! assert_eq!(
//!     seen.lock().unwrap().as_slice(),
//!     ["2".to_string(), "4".to_string()]
//! );
//! ```

use std::sync::Weak;

use crate::adapter::{adapt_slot, Narrow, Payload, SlotFn};
use crate::guard::{GuardCore, LifetimeGuard};
use crate::policies::{ExecutionPolicy, PolicyCell, SynchronousPolicy};
use crate::signal::Connection;

use super::source::{ConnectOptions, Source, Staged};
use super::stage::Stage;

/// A reusable subscription description: callback + policy + options.
///
/// The guard reference is weak; a chain outliving its guard simply stops
/// tracking new applications there.
#[derive(Clone)]
pub struct Bind<F, P = SynchronousPolicy> {
    callback: F,
    policy: P,
    once: bool,
    guard: Option<Weak<GuardCore>>,
}

impl<F> Bind<F, SynchronousPolicy> {
    /// A repeating, synchronous, unguarded subscription description.
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            policy: SynchronousPolicy,
            once: false,
            guard: None,
        }
    }
}

impl<F, P> Bind<F, P> {
    /// Marks applications of this description single-shot.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Replaces the execution policy. Each application clones it.
    pub fn via<Q>(self, policy: Q) -> Bind<F, Q>
    where
        Q: ExecutionPolicy + Clone,
    {
        Bind {
            callback: self.callback,
            policy,
            once: self.once,
            guard: self.guard,
        }
    }

    /// Tracks every application of this description in the given guard.
    #[must_use]
    pub fn guarded(mut self, guard: &LifetimeGuard) -> Self {
        self.guard = Some(guard.downgrade());
        self
    }

    pub(crate) fn establish<S, B>(&self, source: &S) -> Connection
    where
        S: Source + ?Sized,
        B: Payload,
        F: SlotFn<B> + Clone,
        P: ExecutionPolicy + Clone,
        S::Args: Narrow<B>,
    {
        let options = ConnectOptions {
            once: self.once,
            policy: PolicyCell::custom(self.policy.clone()),
        };
        let connection = source.connect_raw(adapt_slot(self.callback.clone()), options);
        if let Some(guard) = self.guard.as_ref().and_then(Weak::upgrade) {
            guard.track(connection.clone());
        }
        connection
    }
}

/// An unbound pipeline: a stage composition plus a [`Bind`] terminal.
///
/// Produced by [`Chainable::bind`](super::Chainable::bind); applied with
/// [`apply`](Chain::apply).
#[derive(Clone)]
pub struct Chain<T, F, P = SynchronousPolicy> {
    stage: T,
    bind: Bind<F, P>,
}

impl<T, F, P> Chain<T, F, P> {
    pub(crate) fn new(stage: T, bind: Bind<F, P>) -> Self {
        Self { stage, bind }
    }

    /// Pins the chain to a source, creating one live, independent
    /// subscription.
    pub fn apply<S, B>(&self, source: S) -> Connection
    where
        S: Source,
        T: Stage<S::Args> + Clone,
        B: Payload,
        F: SlotFn<B> + Clone,
        P: ExecutionPolicy + Clone,
        T::Output: Narrow<B>,
    {
        let staged = Staged {
            source,
            stage: self.stage.clone(),
        };
        self.bind.establish(&staged)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::{filter, map, narrow, transform, Chainable, LifetimeGuard, Signal, SourceExt, TaskQueue};

    use super::*;

    #[test]
    fn test_chain_reuse_across_arities() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        // narrow:: pins the chain to an i32 prefix, so it applies both to
        // a bare (i32,) signal and to an (i32, String) signal.
        let chain = narrow::<(i32,)>()
            .then(filter(|n: i32| n % 2 == 0))
            .then(transform((|n: i32| n.to_string(),)))
            .bind(Bind::new(move |s: String| sink.lock().unwrap().push(s)));

        let plain = Signal::<(i32,)>::new();
        let tagged = Signal::<(i32, String)>::new();
        chain.apply(&plain);
        chain.apply(&tagged);

        plain.publish((5,));
        plain.publish((6,));
        tagged.publish((7, "ignored".to_string()));
        tagged.publish((8, "ignored".to_string()));

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["6".to_string(), "8".to_string()]
        );
    }

    #[test]
    fn test_applications_are_independent() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let chain = map(|n: i32| (n,)).bind_callback(move |_: i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let first = Signal::<(i32,)>::new();
        let second = Signal::<(i32,)>::new();
        let on_first = chain.apply(&first);
        chain.apply(&second);

        on_first.disconnect();
        first.publish((1,));
        second.publish((1,));

        assert_eq!(
            hits.load(Ordering::Relaxed),
            1,
            "disconnecting one application leaves the other live"
        );
    }

    #[test]
    fn test_bind_once_and_guarded() {
        let signal = Signal::<(i32,)>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let guard = LifetimeGuard::new();

        let counter = Arc::clone(&hits);
        let bind = Bind::new(move |_: i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .once()
        .guarded(&guard);

        signal.source().bind(&bind);
        assert_eq!(guard.len(), 1);

        signal.publish((1,));
        signal.publish((2,));
        assert_eq!(hits.load(Ordering::Relaxed), 1, "once applies to bound subscriptions");
        assert_eq!(guard.len(), 0, "consumed single-shot left the guard");
    }

    #[test]
    fn test_bind_via_policy() {
        let queue = TaskQueue::bounded(4);
        let signal = Signal::<(i32,)>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let bind = Bind::new(move |_: i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .via(queue.policy());

        signal.source().bind(&bind);
        signal.publish((1,));
        assert_eq!(hits.load(Ordering::Relaxed), 0);
        queue.run_pending();
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_guard_severs_chain_applications() {
        let signal = Signal::<(i32,)>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let guard = LifetimeGuard::new();

        let counter = Arc::clone(&hits);
        let chain = map(|n: i32| (n,)).bind(
            Bind::new(move |_: i32| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .guarded(&guard),
        );
        chain.apply(&signal);

        signal.publish((1,));
        drop(guard);
        signal.publish((2,));

        assert_eq!(hits.load(Ordering::Relaxed), 1);
        assert_eq!(signal.subscriptions(), 0);
    }
}
