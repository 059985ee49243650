//! # Reorder/drop stages: `map` and `narrow`.
//!
//! [`map`] rebuilds the payload through one typed function taking the full
//! upstream parameter list and returning the new payload tuple — the place
//! to reorder, drop or duplicate values:
//!
//! ```rust
//! use sigcast::{Signal, SourceExt};
//! use std::sync::{Arc, Mutex};
//!
//! let signal = Signal::<(i32, String)>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! signal
//!     .source()
//!     .map(|n: i32, s: String| (s, n)) // swap
//!     .connect(move |s: String, n: i32| sink.lock().unwrap().push((s, n)));
//!
//! signal.publish((1, "one".to_string()));
//! assert_eq!(seen.lock().unwrap().as_slice(), [("one".to_string(), 1)]);
//! ```
//!
//! [`narrow`] keeps a converted prefix and nothing else. Unlike `map`, a
//! narrow stage binds to *any* source whose payload reduces to `B`, which
//! is what lets one chain apply to signals of different arities.

use std::marker::PhantomData;

use crate::adapter::{Narrow, Payload, RawSlot};

use super::stage::{Chainable, Stage};

/// A function rebuilding the payload tuple from the full parameter list.
///
/// Implemented for `Fn` callables of zero to six parameters returning a
/// [`Payload`] tuple.
pub trait MapFn<A: Payload>: Send + Sync + 'static {
    /// The rebuilt payload.
    type Output: Payload;

    /// Applies the rebuild.
    fn apply(&self, args: A) -> Self::Output;
}

impl<F, O> MapFn<()> for F
where
    F: Fn() -> O + Send + Sync + 'static,
    O: Payload,
{
    type Output = O;

    fn apply(&self, _args: ()) -> O {
        self()
    }
}

macro_rules! impl_map_fn {
    ($($a:ident),+) => {
        impl<F, O, $($a),+> MapFn<($($a,)+)> for F
        where
            F: Fn($($a),+) -> O + Send + Sync + 'static,
            O: Payload,
            $($a: Clone + Send + 'static,)+
        {
            type Output = O;

            #[allow(non_snake_case)]
            fn apply(&self, args: ($($a,)+)) -> O {
                let ($($a,)+) = args;
                self($($a),+)
            }
        }
    };
}

impl_map_fn!(A0);
impl_map_fn!(A0, A1);
impl_map_fn!(A0, A1, A2);
impl_map_fn!(A0, A1, A2, A3);
impl_map_fn!(A0, A1, A2, A3, A4);
impl_map_fn!(A0, A1, A2, A3, A4, A5);

/// Stage produced by [`map`].
#[derive(Clone, Debug)]
pub struct MapStage<F> {
    f: F,
}

/// Creates an unbound reorder/drop/rebuild stage.
pub fn map<F>(f: F) -> MapStage<F> {
    MapStage { f }
}

impl<A, F> Stage<A> for MapStage<F>
where
    A: Payload,
    F: MapFn<A> + Clone,
{
    type Output = F::Output;

    fn adapt(&self, inner: RawSlot<F::Output>) -> RawSlot<A> {
        let f = self.f.clone();
        Box::new(move |args: A| inner(f.apply(args)))
    }
}

impl<F> Chainable for MapStage<F> {}

/// Stage produced by [`narrow`].
pub struct NarrowStage<B> {
    marker: PhantomData<fn(B)>,
}

impl<B> Clone for NarrowStage<B> {
    fn clone(&self) -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<B> std::fmt::Debug for NarrowStage<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NarrowStage")
    }
}

/// Creates an unbound prefix-selection stage: downstream sees the payload
/// narrowed to `B`.
///
/// The stage accepts any upstream payload reducing to `B`, which makes
/// chains starting with it reusable across sources of different arities.
#[must_use]
pub fn narrow<B: Payload>() -> NarrowStage<B> {
    NarrowStage {
        marker: PhantomData,
    }
}

impl<A, B> Stage<A> for NarrowStage<B>
where
    A: Narrow<B>,
    B: Payload,
{
    type Output = B;

    fn adapt(&self, inner: RawSlot<B>) -> RawSlot<A> {
        Box::new(move |args: A| inner(args.narrow()))
    }
}

impl<B> Chainable for NarrowStage<B> {}
