//! # Pipeline stages and composition.
//!
//! A [`Stage`] rewrites the slot a downstream subscriber installed into a
//! slot the upstream source understands — stages adapt *subscribers*, not
//! events, so an unbound stage weighs nothing until a subscription pins it
//! to a source.
//!
//! Stages are plain values: clone them, [`then`](Chainable::then) them
//! together, ship them across threads, apply them to as many sources as
//! their input type allows.

use crate::adapter::{Payload, RawSlot};
use crate::policies::{ExecutionPolicy, SynchronousPolicy};

use super::chain::{Bind, Chain};

/// A payload rewrite between a source and a subscription.
pub trait Stage<A: Payload> {
    /// The payload seen downstream of this stage.
    type Output: Payload;

    /// Wraps a downstream slot into one accepting the upstream payload.
    fn adapt(&self, inner: RawSlot<Self::Output>) -> RawSlot<A>;
}

/// Composition surface shared by every stage type.
pub trait Chainable: Sized {
    /// Chains another stage after this one. Composition is associative.
    fn then<U: Chainable>(self, next: U) -> Composed<Self, U> {
        Composed {
            first: self,
            second: next,
        }
    }

    /// Terminates the stage with a subscription description, yielding a
    /// reusable [`Chain`].
    fn bind<F, P>(self, bind: Bind<F, P>) -> Chain<Self, F, P>
    where
        P: ExecutionPolicy + Clone,
    {
        Chain::new(self, bind)
    }

    /// Shorthand for binding a bare callback with default options.
    fn bind_callback<F>(self, callback: F) -> Chain<Self, F, SynchronousPolicy> {
        Chain::new(self, Bind::new(callback))
    }
}

/// Two stages applied in sequence.
#[derive(Clone, Debug)]
pub struct Composed<S, T> {
    first: S,
    second: T,
}

impl<A, S, T> Stage<A> for Composed<S, T>
where
    A: Payload,
    S: Stage<A>,
    T: Stage<S::Output>,
{
    type Output = T::Output;

    fn adapt(&self, inner: RawSlot<T::Output>) -> RawSlot<A> {
        self.first.adapt(self.second.adapt(inner))
    }
}

impl<S, T> Chainable for Composed<S, T> {}
