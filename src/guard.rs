//! # Lifetime guard: auto-disconnect on drop.
//!
//! A [`LifetimeGuard`] is a lifetime anchor a consumer object embeds.
//! Every connection [`track`](LifetimeGuard::track)ed against it is severed
//! when the guard drops — including while another thread is mid-publish on
//! the same signal.
//!
//! ## Teardown protocol
//! Guard teardown can race with (a) dispatch of the very subscription being
//! torn down and (b) the subscription disconnecting itself (single-shot
//! consumption, explicit disconnect) and notifying the guard back. The
//! rules that keep this safe:
//!
//! - each state holds a *weak* back-pointer to its guard and atomically
//!   takes-and-clears it before notifying, so at most one side runs the
//!   guard-side cleanup for a given state;
//! - the guard drains its collection under its lock, releases the lock,
//!   and only then disconnects — so no path ever holds the guard lock and
//!   a state's bookkeeping lock at the same time in conflicting order
//!   (state bookkeeping first, guard collection second, always).

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use crate::signal::{Connection, ConnectionOps};
use crate::sync::lock;

pub(crate) struct GuardCore {
    tracked: Mutex<Vec<(u64, Connection)>>,
}

impl GuardCore {
    /// Tracks a connection and installs the guard back-pointer on its
    /// state. A dead connection is ignored.
    pub(crate) fn track(self: &Arc<Self>, connection: Connection) {
        let Some(ops) = connection.upgrade() else {
            return;
        };
        let key = ops.key();
        let previous = ops.set_guard(Arc::downgrade(self));
        if let Some(old) = previous.and_then(|weak| weak.upgrade()) {
            if !Arc::ptr_eq(&old, self) {
                old.forget(key);
            }
        }
        lock(&self.tracked).push((key, connection));
    }

    /// Drops the bookkeeping entry for a state that detached itself.
    pub(crate) fn forget(&self, key: u64) {
        lock(&self.tracked).retain(|(tracked_key, _)| *tracked_key != key);
    }
}

/// Severs every tracked subscription when dropped.
///
/// Cloning a guard yields a **fresh, empty** guard: a type embedding one
/// stays clonable without the copy sharing (or stealing) subscription
/// ownership.
///
/// # Example
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use sigcast::{LifetimeGuard, Signal, SourceExt};
///
/// let signal = Signal::<()>::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// {
///     let guard = LifetimeGuard::new();
///     let counter = Arc::clone(&hits);
///     guard.track(signal.source().connect(move || {
///         counter.fetch_add(1, Ordering::Relaxed);
///     }));
///     signal.publish(());
/// } // guard drops, subscription severed
///
/// signal.publish(());
/// assert_eq!(hits.load(Ordering::Relaxed), 1);
/// ```
pub struct LifetimeGuard {
    core: Arc<GuardCore>,
}

impl LifetimeGuard {
    /// Creates an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: Arc::new(GuardCore {
                tracked: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Takes ownership of a subscription's teardown.
    ///
    /// The connection is severed when the guard drops. A connection whose
    /// subscription is already gone is ignored. Tracking a connection that
    /// another guard owns moves ownership to this guard.
    pub fn track(&self, connection: Connection) {
        self.core.track(connection);
    }

    /// Number of subscriptions currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.core.tracked).len()
    }

    /// True if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn downgrade(&self) -> Weak<GuardCore> {
        Arc::downgrade(&self.core)
    }
}

impl Default for LifetimeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LifetimeGuard {
    /// Returns a fresh, empty guard; tracked subscriptions are never
    /// shared between copies.
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for LifetimeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeGuard")
            .field("tracked", &self.len())
            .finish()
    }
}

impl Drop for LifetimeGuard {
    fn drop(&mut self) {
        // Drain under the lock, disconnect outside of it.
        let tracked = std::mem::take(&mut *lock(&self.core.tracked));
        for (_, connection) in tracked {
            connection.disconnect();
        }
    }
}
