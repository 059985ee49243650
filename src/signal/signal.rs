//! # Signal: the typed publish point.
//!
//! A [`Signal`] is owned by the producer that declares it; `publish` lives
//! only here, so owning the value *is* the capability to emit. Consumers
//! are handed a [`SignalSource`] — a weak, clonable, connect-only view —
//! or a `&Signal` when the producer wants to share full access.
//!
//! Dropping the signal drops every subscription with it; outstanding
//! [`Connection`](super::Connection) handles and
//! [`SignalSource`]s degrade to silent no-ops.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::adapter::{Payload, RawSlot};
use crate::pipeline::{ConnectOptions, Source};

use super::connection::Connection;
use super::core::SignalCore;

/// A typed publish point over the payload tuple `A`.
///
/// # Example
/// ```rust
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use std::sync::Arc;
/// use sigcast::{Signal, SourceExt};
///
/// let ticks = Signal::<(i64,)>::new();
///
/// let total = Arc::new(AtomicI64::new(0));
/// let sum = Arc::clone(&total);
/// ticks.source().connect(move |tick: i64| {
///     sum.fetch_add(tick, Ordering::Relaxed);
/// });
///
/// ticks.publish((40,));
/// ticks.publish((2,));
/// assert_eq!(total.load(Ordering::Relaxed), 42);
/// ```
pub struct Signal<A: Payload> {
    core: Arc<SignalCore<A>>,
}

impl<A: Payload> Signal<A> {
    /// Creates a signal with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SignalCore::new(),
        }
    }

    /// Dispatches `args` to every active subscription, in subscription
    /// order, on a snapshot taken at the start of the call.
    pub fn publish(&self, args: A) {
        self.core.publish(args);
    }

    /// A connect-only view of this signal for handing to consumers.
    #[must_use]
    pub fn source(&self) -> SignalSource<A> {
        SignalSource {
            core: Arc::downgrade(&self.core),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriptions(&self) -> usize {
        self.core.len()
    }

    pub(crate) fn weak_core(&self) -> Weak<SignalCore<A>> {
        Arc::downgrade(&self.core)
    }
}

impl<A: Payload> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Payload> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscriptions", &self.core.len())
            .finish()
    }
}

impl<'a, A: Payload> Source for &'a Signal<A> {
    type Args = A;

    fn connect_raw(&self, slot: RawSlot<A>, options: ConnectOptions) -> Connection {
        self.core.attach(slot, options)
    }
}

/// Weak, clonable, connect-only view of a [`Signal`].
///
/// Connecting through a source whose signal is gone yields an inert
/// [`Connection`]; nothing faults.
pub struct SignalSource<A: Payload> {
    core: Weak<SignalCore<A>>,
}

impl<A: Payload> Clone for SignalSource<A> {
    fn clone(&self) -> Self {
        Self {
            core: Weak::clone(&self.core),
        }
    }
}

impl<A: Payload> fmt::Debug for SignalSource<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSource")
            .field("attached", &(self.core.strong_count() > 0))
            .finish()
    }
}

impl<A: Payload> Source for SignalSource<A> {
    type Args = A;

    fn connect_raw(&self, slot: RawSlot<A>, options: ConnectOptions) -> Connection {
        match self.core.upgrade() {
            Some(core) => core.attach(slot, options),
            None => Connection::inert(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::SourceExt;

    use super::*;

    #[test]
    fn test_arity_and_conversion_end_to_end() {
        let signal = Signal::<(i32, String)>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        signal.source().connect(move |n: i32, s: String| {
            sink.lock().unwrap().push(format!("both:{n}:{s}"));
        });

        let sink = Arc::clone(&seen);
        signal.source().connect(move |n: i32| {
            sink.lock().unwrap().push(format!("int:{n}"));
        });

        let sink = Arc::clone(&seen);
        signal.source().connect(move |n: f64| {
            sink.lock().unwrap().push(format!("float:{n:.1}"));
        });

        let sink = Arc::clone(&seen);
        signal.source().connect(move || {
            sink.lock().unwrap().push("none".to_string());
        });

        signal.publish((5, "x".to_string()));

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            [
                "both:5:x".to_string(),
                "int:5".to_string(),
                "float:5.0".to_string(),
                "none".to_string(),
            ]
        );
    }

    #[test]
    fn test_source_of_dropped_signal_yields_inert_connection() {
        let signal = Signal::<(i32,)>::new();
        let source = signal.source();
        drop(signal);

        let connection = source.connect(|_: i32| {});
        connection.disconnect(); // no-op, no fault
        assert!(format!("{source:?}").contains("attached: false"));
    }

    #[test]
    fn test_subscription_count_tracks_lifecycle() {
        let signal = Signal::<()>::new();
        assert_eq!(signal.subscriptions(), 0);

        let connection = signal.source().connect(|| {});
        signal.source().connect(|| {});
        assert_eq!(signal.subscriptions(), 2);

        connection.disconnect();
        assert_eq!(signal.subscriptions(), 1);
    }
}
