//! # Signal core: copy-on-write subscriber storage and dispatch.
//!
//! The collection of subscription states lives behind
//! `Mutex<Arc<Vec<...>>>`. Mutation (connect, disconnect) rebuilds the
//! vector and swaps the `Arc` under the lock; `publish` takes one `Arc`
//! clone under the lock and then dispatches entirely lock-free over that
//! immutable snapshot.
//!
//! ## Consequences
//! - A subscription added during dispatch is invisible to the in-flight
//!   publish; it runs starting with the next one.
//! - A subscription removed during dispatch still runs if it was already
//!   in the snapshot (the snapshot keeps its state alive).
//! - Dispatch and mutation never contend beyond the snapshot read; no
//!   iterator invalidation, no lock held across user callbacks.

use std::sync::{Arc, Mutex};

use crate::adapter::{Payload, RawSlot};
use crate::pipeline::ConnectOptions;
use crate::sync::lock;

use super::connection::Connection;
use super::state::SubscriptionState;

pub(crate) struct SignalCore<A: Payload> {
    slots: Mutex<Arc<Vec<Arc<SubscriptionState<A>>>>>,
}

impl<A: Payload> SignalCore<A> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            slots: Mutex::new(Arc::new(Vec::new())),
        })
    }

    /// Appends a new state to a fresh copy of the collection and swaps it
    /// in. Returns the weak handle for the new subscription.
    pub(crate) fn attach(
        self: &Arc<Self>,
        slot: RawSlot<A>,
        options: ConnectOptions,
    ) -> Connection {
        let state = Arc::new(SubscriptionState::new(
            slot,
            Arc::downgrade(self),
            options.policy,
            options.once,
        ));
        let connection = Connection::from_state(&state);

        #[cfg(feature = "tracing")]
        tracing::trace!(key = state.key, once = options.once, "subscription connected");

        let mut slots = lock(&self.slots);
        let mut next = Vec::with_capacity(slots.len() + 1);
        next.extend(slots.iter().cloned());
        next.push(state);
        *slots = Arc::new(next);

        connection
    }

    /// Swaps in a copy of the collection without the given state.
    /// Idempotent; concurrent publish snapshots are unaffected.
    pub(crate) fn remove(&self, key: u64) {
        let mut slots = lock(&self.slots);
        if !slots.iter().any(|state| state.key == key) {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(key, "subscription disconnected");

        let next: Vec<_> = slots
            .iter()
            .filter(|state| state.key != key)
            .cloned()
            .collect();
        *slots = Arc::new(next);
    }

    /// Dispatches to a snapshot of the collection, in insertion order.
    ///
    /// All states but the last receive a clone of the arguments; the last
    /// one takes them by move.
    pub(crate) fn publish(&self, args: A) {
        let snapshot = Arc::clone(&lock(&self.slots));

        #[cfg(feature = "tracing")]
        tracing::trace!(subscriptions = snapshot.len(), "publish");

        let Some((last, rest)) = snapshot.split_last() else {
            return;
        };
        for state in rest {
            state.invoke(args.clone());
        }
        last.invoke(args);
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.slots).len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::{Signal, SourceExt};

    #[test]
    fn test_dispatch_in_subscription_order_exactly_once() {
        let signal = Signal::<(i32,)>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..5 {
            let sink = Arc::clone(&order);
            signal.source().connect(move |value: i32| {
                sink.lock().unwrap().push((tag, value));
            });
        }

        signal.publish((42,));
        assert_eq!(
            order.lock().unwrap().as_slice(),
            [(0, 42), (1, 42), (2, 42), (3, 42), (4, 42)]
        );
    }

    #[test]
    fn test_publish_with_no_subscribers() {
        let signal = Signal::<(i32,)>::new();
        signal.publish((1,));
    }

    #[test]
    fn test_subscribe_during_dispatch_waits_for_next_publish() {
        let signal = Signal::<()>::new();
        let source = signal.source();
        let late_hits = Arc::new(AtomicUsize::new(0));

        let late = Arc::clone(&late_hits);
        signal.source().connect(move || {
            let counter = Arc::clone(&late);
            source.connect(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        });

        signal.publish(());
        assert_eq!(
            late_hits.load(Ordering::Relaxed),
            0,
            "a subscription added mid-dispatch must not run in the same publish"
        );

        signal.publish(());
        assert_eq!(late_hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_disconnect_during_dispatch_does_not_retract_snapshot_entry() {
        let signal = Signal::<()>::new();

        let victim_hits = Arc::new(AtomicUsize::new(0));
        let victim_holder: Arc<Mutex<Option<crate::Connection>>> = Arc::new(Mutex::new(None));

        let holder = Arc::clone(&victim_holder);
        signal.source().connect(move || {
            if let Some(victim) = holder.lock().unwrap().as_ref() {
                victim.disconnect();
            }
        });

        let counter = Arc::clone(&victim_hits);
        let victim = signal.source().connect(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        *victim_holder.lock().unwrap() = Some(victim);

        signal.publish(());
        assert_eq!(
            victim_hits.load(Ordering::Relaxed),
            1,
            "already-snapshotted entry still runs in this publish"
        );

        signal.publish(());
        assert_eq!(
            victim_hits.load(Ordering::Relaxed),
            1,
            "and is gone from the next one"
        );
    }

    #[test]
    fn test_single_shot_runs_once() {
        let signal = Signal::<(i32,)>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let connection = signal.source().connect_once(move |_: i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        signal.publish((1,));
        signal.publish((2,));
        assert_eq!(hits.load(Ordering::Relaxed), 1);

        // Already consumed: a late disconnect is a no-op.
        connection.disconnect();
    }

    #[test]
    fn test_single_shot_cannot_retrigger_through_reentrant_publish() {
        let signal = Arc::new(Signal::<(i32,)>::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let inner = Arc::clone(&signal);
        signal.source().connect_once(move |depth: i32| {
            counter.fetch_add(1, Ordering::Relaxed);
            if depth == 0 {
                inner.publish((1,));
            }
        });

        signal.publish((0,));
        assert_eq!(
            hits.load(Ordering::Relaxed),
            1,
            "re-entrant publish must not see the consumed single-shot"
        );
    }
}
