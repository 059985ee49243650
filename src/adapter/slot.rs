//! Callbacks viewed as subscribers.
//!
//! [`SlotFn`] lifts a plain function or closure into the form the signal
//! core stores: a boxed `Fn` over the payload tuple ([`RawSlot`]). The
//! per-arity implementations below are what make arity adaptation a
//! compile-time decision — a callback either satisfies `SlotFn<B>` for the
//! (unique) tuple of its own parameters, or the `connect` call does not
//! type-check.
//!
//! Callbacks are `Fn`, not `FnMut`: dispatch may run from several publishing
//! threads at once and may re-enter the same subscription through forwarding
//! cycles. Mutable state belongs behind interior mutability
//! (`AtomicUsize`, `Mutex`, ...).

use super::payload::{Narrow, Payload};

/// The stored form of an adapted callback: owns its captures and takes the
/// payload tuple by value.
pub type RawSlot<A> = Box<dyn Fn(A) + Send + Sync + 'static>;

/// A function or closure usable as a subscriber for the parameter tuple `B`.
///
/// Implemented for `Fn` callables of zero to six parameters. The signal's
/// payload is [narrowed](crate::Narrow) to `B` before the call, which is
/// where trailing parameters are dropped and conversions applied.
pub trait SlotFn<B: Payload>: Send + Sync + 'static {
    /// Invokes the callback with an already-narrowed argument tuple.
    fn call(&self, args: B);
}

impl<F> SlotFn<()> for F
where
    F: Fn() + Send + Sync + 'static,
{
    fn call(&self, _args: ()) {
        self()
    }
}

macro_rules! impl_slot_fn {
    ($($b:ident),+) => {
        impl<F, $($b),+> SlotFn<($($b,)+)> for F
        where
            F: Fn($($b),+) + Send + Sync + 'static,
            $($b: Clone + Send + 'static,)+
        {
            #[allow(non_snake_case)]
            fn call(&self, args: ($($b,)+)) {
                let ($($b,)+) = args;
                self($($b),+)
            }
        }
    };
}

impl_slot_fn!(B0);
impl_slot_fn!(B0, B1);
impl_slot_fn!(B0, B1, B2);
impl_slot_fn!(B0, B1, B2, B3);
impl_slot_fn!(B0, B1, B2, B3, B4);
impl_slot_fn!(B0, B1, B2, B3, B4, B5);

/// Builds the stored slot for a callback binding to a narrowed payload.
pub(crate) fn adapt_slot<A, B, F>(callback: F) -> RawSlot<A>
where
    A: Narrow<B>,
    B: Payload,
    F: SlotFn<B>,
{
    Box::new(move |args: A| callback.call(args.narrow()))
}
