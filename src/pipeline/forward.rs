//! # Signal-to-signal forwarding.
//!
//! [`Forward`] lets one source's publishes re-emit on another signal,
//! optionally through any pipeline stage (the source side of the call can
//! already be a [`Staged`](super::Staged) wrapper). The target's payload
//! must be a converted prefix of what the source delivers.
//!
//! The registration is tracked by the receiving object's
//! [`LifetimeGuard`], so it is severed automatically when that object goes
//! away; the reference to the target signal is weak, so a target dropped
//! first degrades the forward to a silent no-op.

use crate::adapter::{Narrow, Payload, RawSlot};
use crate::guard::LifetimeGuard;
use crate::signal::{Connection, Signal};

use super::source::{ConnectOptions, Source};

/// Forwarding surface, available on every [`Source`].
pub trait Forward: Source {
    /// Republishes every event on `target`, narrowed to its payload.
    fn forward_to<T>(&self, target: &Signal<T>, guard: &LifetimeGuard) -> Connection
    where
        T: Payload,
        Self::Args: Narrow<T>,
    {
        forward_impl(self, target, guard, false)
    }

    /// Republishes only the next event, then disconnects.
    fn forward_once_to<T>(&self, target: &Signal<T>, guard: &LifetimeGuard) -> Connection
    where
        T: Payload,
        Self::Args: Narrow<T>,
    {
        forward_impl(self, target, guard, true)
    }
}

impl<S: Source> Forward for S {}

fn forward_impl<S, T>(
    source: &S,
    target: &Signal<T>,
    guard: &LifetimeGuard,
    once: bool,
) -> Connection
where
    S: Source + ?Sized,
    T: Payload,
    S::Args: Narrow<T>,
{
    let core = target.weak_core();
    let slot: RawSlot<S::Args> = Box::new(move |args: S::Args| {
        if let Some(core) = core.upgrade() {
            core.publish(args.narrow());
        }
    });

    let options = if once {
        ConnectOptions::new().once()
    } else {
        ConnectOptions::new()
    };
    let connection = source.connect_raw(slot, options);
    guard.track(connection.clone());
    connection
}
