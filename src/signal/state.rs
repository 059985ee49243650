//! # Subscription state: the unit of lifecycle.
//!
//! A [`SubscriptionState`] is strongly owned by exactly one place — its
//! signal's copy-on-write collection — and weakly observed by everything
//! else ([`Connection`](super::Connection) handles, a
//! [`LifetimeGuard`](crate::LifetimeGuard)). Erasing it from the collection
//! is what kills it; every weak observer then degrades to a silent no-op.
//!
//! ## Dispatch path (one state, one publish)
//! ```text
//! invoke(args)
//!   ├─ suspended? ──────────────► return
//!   ├─ single-shot? ────────────► detach first (a re-entrant publish
//!   │                             can no longer see this state)
//!   ├─ snapshot panic handlers
//!   └─ policy
//!        ├─ built-in synchronous ─► run here, on the publish stack
//!        └─ custom ──────────────► hand an owned task to execute()
//! ```
//!
//! ## Panic contract
//! - handlers registered: every handler observes the payload, in
//!   registration order, and the publish continues normally;
//! - no handlers: the panic propagates, aborting the remainder of that
//!   publish (fail-fast).
//!
//! Handlers are snapshotted at publish time, including into deferred
//! tasks: a handler added after `publish` but before a queue drain does
//! not apply to the already-captured task.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::adapter::{Payload, RawSlot};
use crate::guard::GuardCore;
use crate::policies::PolicyCell;
use crate::sync::lock;

use super::core::SignalCore;

/// Global counter for subscription keys.
static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

fn next_key() -> u64 {
    NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

/// A registered panic handler.
pub(crate) type PanicHandler = Arc<dyn Fn(&(dyn Any + Send)) + Send + Sync + 'static>;

/// Payload-erased view of a subscription state, as seen by handles and
/// guards.
pub(crate) trait ConnectionOps: Send + Sync {
    fn key(&self) -> u64;
    fn disconnect(&self);
    fn suspend(&self);
    fn resume(&self);
    fn add_panic_handler(&self, handler: PanicHandler);
    /// Installs a guard back-pointer, returning the previous one.
    fn set_guard(&self, guard: Weak<GuardCore>) -> Option<Weak<GuardCore>>;
}

pub(crate) struct SubscriptionState<A: Payload> {
    pub(crate) key: u64,
    slot: RawSlot<A>,
    owner: Weak<SignalCore<A>>,
    policy: PolicyCell,
    single_shot: bool,
    suspended: AtomicBool,
    handlers: Mutex<Vec<PanicHandler>>,
    guard: Mutex<Option<Weak<GuardCore>>>,
}

impl<A: Payload> SubscriptionState<A> {
    pub(crate) fn new(
        slot: RawSlot<A>,
        owner: Weak<SignalCore<A>>,
        policy: PolicyCell,
        single_shot: bool,
    ) -> Self {
        Self {
            key: next_key(),
            slot,
            owner,
            policy,
            single_shot,
            suspended: AtomicBool::new(false),
            handlers: Mutex::new(Vec::new()),
            guard: Mutex::new(None),
        }
    }

    pub(crate) fn invoke(self: &Arc<Self>, args: A) {
        if self.suspended.load(Ordering::Relaxed) {
            return;
        }
        if self.single_shot {
            // Detach before running: a callback re-entering publish on the
            // same signal must not be able to re-trigger itself.
            self.detach();
        }

        let handlers = lock(&self.handlers).clone();
        match &self.policy {
            PolicyCell::Synchronous => safe_execute(&*self.slot, &handlers, args),
            PolicyCell::Custom(policy) => {
                let state = Arc::clone(self);
                policy.execute(Box::new(move || {
                    safe_execute(&*state.slot, &handlers, args);
                }));
            }
        }
    }

    /// Removes this state from its signal and notifies the guard, if any.
    ///
    /// Take-then-notify: the back-pointer is cleared before calling into
    /// the guard, so for a given state at most one side (state or guard)
    /// ever runs the guard-side cleanup, and no path holds both the
    /// state's bookkeeping lock and the guard's collection lock at once.
    fn detach(&self) {
        if let Some(core) = self.owner.upgrade() {
            core.remove(self.key);
        }
        let guard = lock(&self.guard).take();
        if let Some(core) = guard.and_then(|weak| weak.upgrade()) {
            core.forget(self.key);
        }
    }
}

impl<A: Payload> ConnectionOps for SubscriptionState<A> {
    fn key(&self) -> u64 {
        self.key
    }

    fn disconnect(&self) {
        self.detach();
    }

    fn suspend(&self) {
        self.suspended.store(true, Ordering::Relaxed);
    }

    fn resume(&self) {
        self.suspended.store(false, Ordering::Relaxed);
    }

    fn add_panic_handler(&self, handler: PanicHandler) {
        lock(&self.handlers).push(handler);
    }

    fn set_guard(&self, guard: Weak<GuardCore>) -> Option<Weak<GuardCore>> {
        lock(&self.guard).replace(guard)
    }
}

fn safe_execute<A: Payload>(
    slot: &(dyn Fn(A) + Send + Sync),
    handlers: &[PanicHandler],
    args: A,
) {
    if handlers.is_empty() {
        // Fail-fast: nothing to route to, let the panic reach the publisher.
        slot(args);
        return;
    }
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| slot(args))) {
        for handler in handlers {
            // Handlers are expected not to panic. If one does, that is not
            // on us.
            handler(payload.as_ref());
        }
    }
}
