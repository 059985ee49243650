//! # Connection handles.
//!
//! A [`Connection`] is a weak, freely clonable reference to one
//! subscription. It is the only thing callers hold; the subscription itself
//! stays owned by its signal. Once the subscription is gone — explicit
//! disconnect, guard cleanup, or the signal being dropped — every copy of
//! the handle becomes permanently inert and all operations on it silently
//! succeed as no-ops. Use-after-teardown is not a hazard class here.
//!
//! [`ScopedConnection`] and [`Inhibitor`] are the RAII companions:
//! disconnect-on-drop and suspend-while-alive.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::adapter::Payload;

use super::state::{ConnectionOps, PanicHandler, SubscriptionState};

/// Weak handle to one subscription.
///
/// All clones observe the same underlying subscription. Every operation on
/// an already-dead subscription is a silent no-op.
#[derive(Clone)]
pub struct Connection {
    ops: Weak<dyn ConnectionOps>,
}

impl Connection {
    pub(crate) fn from_state<A: Payload>(state: &Arc<SubscriptionState<A>>) -> Self {
        let ops: Arc<dyn ConnectionOps> = state.clone();
        Self {
            ops: Arc::downgrade(&ops),
        }
    }

    /// A handle that was never attached to anything.
    pub(crate) fn inert() -> Self {
        struct Detached;
        impl ConnectionOps for Detached {
            fn key(&self) -> u64 {
                u64::MAX
            }
            fn disconnect(&self) {}
            fn suspend(&self) {}
            fn resume(&self) {}
            fn add_panic_handler(&self, _handler: PanicHandler) {}
            fn set_guard(
                &self,
                _guard: Weak<crate::guard::GuardCore>,
            ) -> Option<Weak<crate::guard::GuardCore>> {
                None
            }
        }

        let ops: Weak<dyn ConnectionOps> = Weak::<Detached>::new();
        Self { ops }
    }

    pub(crate) fn upgrade(&self) -> Option<Arc<dyn ConnectionOps>> {
        self.ops.upgrade()
    }

    /// Permanently removes the subscription from its signal. Idempotent.
    pub fn disconnect(&self) {
        if let Some(ops) = self.ops.upgrade() {
            ops.disconnect();
        }
    }

    /// Mutes the subscription without removing it. Reversible via
    /// [`resume`](Self::resume), repeatable arbitrarily many times.
    pub fn suspend(&self) {
        if let Some(ops) = self.ops.upgrade() {
            ops.suspend();
        }
    }

    /// Unmutes a suspended subscription.
    pub fn resume(&self) {
        if let Some(ops) = self.ops.upgrade() {
            ops.resume();
        }
    }

    /// Registers a panic handler for this subscription.
    ///
    /// Handlers accumulate for the life of the subscription and run in
    /// registration order when the callback panics; see the
    /// [state module](crate::Signal) docs for the exact contract.
    pub fn add_panic_handler<H>(&self, handler: H)
    where
        H: Fn(&(dyn Any + Send)) + Send + Sync + 'static,
    {
        if let Some(ops) = self.ops.upgrade() {
            ops.add_panic_handler(Arc::new(handler));
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("attached", &(self.ops.strong_count() > 0))
            .finish()
    }
}

/// Disconnects the held subscription when dropped.
#[derive(Debug)]
pub struct ScopedConnection {
    connection: Connection,
}

impl ScopedConnection {
    /// Severs the subscription now instead of at drop. Idempotent.
    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    /// A plain handle to the same subscription.
    #[must_use]
    pub fn handle(&self) -> Connection {
        self.connection.clone()
    }
}

impl From<Connection> for ScopedConnection {
    fn from(connection: Connection) -> Self {
        Self { connection }
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.connection.disconnect();
    }
}

/// Suspends the held subscription for its own lifetime.
///
/// The subscription is suspended on construction and resumed on drop; if
/// it died in between, both sides are no-ops.
#[derive(Debug)]
pub struct Inhibitor {
    connection: Connection,
}

impl Inhibitor {
    /// Suspends the subscription until the returned value is dropped.
    #[must_use]
    pub fn new(connection: Connection) -> Self {
        connection.suspend();
        Self { connection }
    }
}

impl Drop for Inhibitor {
    fn drop(&mut self) {
        self.connection.resume();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::{Signal, SourceExt};

    use super::*;

    fn counting_signal() -> (Signal<(i32,)>, Connection, Arc<AtomicUsize>) {
        let signal = Signal::<(i32,)>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let connection = signal.source().connect(move |_: i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        (signal, connection, hits)
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let (signal, connection, hits) = counting_signal();

        signal.publish((1,));
        connection.disconnect();
        connection.disconnect();
        signal.publish((2,));

        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_suspend_resume_is_repeatable() {
        let (signal, connection, hits) = counting_signal();

        for round in 1..=3 {
            connection.suspend();
            signal.publish((0,));
            assert_eq!(hits.load(Ordering::Relaxed), round - 1);

            connection.resume();
            signal.publish((0,));
            assert_eq!(hits.load(Ordering::Relaxed), round);
        }
    }

    #[test]
    fn test_clones_observe_the_same_subscription() {
        let (signal, connection, hits) = counting_signal();

        let other = connection.clone();
        other.suspend();
        signal.publish((0,));
        connection.resume();
        signal.publish((0,));

        assert_eq!(hits.load(Ordering::Relaxed), 1);

        other.disconnect();
        signal.publish((0,));
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_handle_outliving_its_signal_is_inert() {
        let (signal, connection, _hits) = counting_signal();
        drop(signal);

        // All of these must be silent no-ops.
        connection.suspend();
        connection.resume();
        connection.add_panic_handler(|_| {});
        connection.disconnect();
        assert!(format!("{connection:?}").contains("attached: false"));
    }

    #[test]
    fn test_scoped_connection_disconnects_on_drop() {
        let (signal, connection, hits) = counting_signal();

        {
            let _scoped = ScopedConnection::from(connection);
            signal.publish((0,));
        }
        signal.publish((0,));

        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_inhibitor_suspends_for_its_lifetime() {
        let (signal, connection, hits) = counting_signal();

        {
            let _inhibitor = Inhibitor::new(connection.clone());
            signal.publish((0,));
        }
        signal.publish((0,));

        assert_eq!(hits.load(Ordering::Relaxed), 1, "suspended inside, resumed after");
    }
}
