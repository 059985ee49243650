//! # Sources and the connect surface.
//!
//! A [`Source`] is anything a callback can subscribe to: a
//! [`Signal`](crate::Signal) (by reference), a
//! [`SignalSource`](crate::SignalSource), or a [`Staged`] pipeline wrapper.
//! [`SourceExt`] provides the whole user-facing surface on top of the one
//! required method — typed `connect*` variants, the pipeline combinators
//! and the [`Bind`](super::Bind) terminal.

use crate::adapter::{adapt_slot, Narrow, Payload, Predicate, RawSlot, SlotFn};
use crate::policies::{ExecutionPolicy, PolicyCell};
use crate::signal::Connection;

use super::chain::Bind;
use super::filter::{filter, FilterStage};
use super::map::{map, MapStage};
use super::stage::Stage;
use super::transform::{transform, TransformSet, TransformStage};
use super::MapFn;

/// Options for a raw subscription: single-shot flag plus execution policy.
///
/// The typed `connect*` methods build these internally; implementing
/// [`Source`] for a new type only requires passing them through.
pub struct ConnectOptions {
    pub(crate) once: bool,
    pub(crate) policy: PolicyCell,
}

impl ConnectOptions {
    /// Synchronous, repeating subscription.
    #[must_use]
    pub fn new() -> Self {
        Self {
            once: false,
            policy: PolicyCell::Synchronous,
        }
    }

    /// Marks the subscription single-shot: it disconnects itself right
    /// before its first invocation.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Runs the subscription through the given execution policy.
    #[must_use]
    pub fn via<P: ExecutionPolicy>(mut self, policy: P) -> Self {
        self.policy = PolicyCell::custom(policy);
        self
    }
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Something a callback can subscribe to.
pub trait Source {
    /// The payload tuple this source delivers.
    type Args: Payload;

    /// Installs an already-adapted slot. Everything else is sugar over
    /// this.
    fn connect_raw(&self, slot: RawSlot<Self::Args>, options: ConnectOptions) -> Connection;
}

/// The user-facing subscribe/combinator surface, available on every
/// [`Source`].
pub trait SourceExt: Source {
    /// Subscribes a callback with the built-in synchronous policy.
    ///
    /// The callback may take any converted prefix of the payload; see
    /// [`Narrow`].
    fn connect<B, F>(&self, callback: F) -> Connection
    where
        B: Payload,
        F: SlotFn<B>,
        Self::Args: Narrow<B>,
    {
        self.connect_raw(adapt_slot(callback), ConnectOptions::new())
    }

    /// Subscribes a callback that runs at most once, then disconnects
    /// itself.
    fn connect_once<B, F>(&self, callback: F) -> Connection
    where
        B: Payload,
        F: SlotFn<B>,
        Self::Args: Narrow<B>,
    {
        self.connect_raw(adapt_slot(callback), ConnectOptions::new().once())
    }

    /// Subscribes a callback running through the given execution policy.
    fn connect_via<B, F, P>(&self, callback: F, policy: P) -> Connection
    where
        B: Payload,
        F: SlotFn<B>,
        P: ExecutionPolicy,
        Self::Args: Narrow<B>,
    {
        self.connect_raw(adapt_slot(callback), ConnectOptions::new().via(policy))
    }

    /// Single-shot subscription through the given execution policy.
    fn connect_once_via<B, F, P>(&self, callback: F, policy: P) -> Connection
    where
        B: Payload,
        F: SlotFn<B>,
        P: ExecutionPolicy,
        Self::Args: Narrow<B>,
    {
        self.connect_raw(adapt_slot(callback), ConnectOptions::new().once().via(policy))
    }

    /// Subscribes a reusable [`Bind`] description to this source.
    fn bind<B, F, P>(&self, bind: &Bind<F, P>) -> Connection
    where
        B: Payload,
        F: SlotFn<B> + Clone,
        P: ExecutionPolicy + Clone,
        Self::Args: Narrow<B>,
    {
        bind.establish(self)
    }

    /// Wraps this source in an arbitrary pipeline stage.
    fn pipe<T>(self, stage: T) -> Staged<Self, T>
    where
        Self: Sized,
        T: Stage<Self::Args>,
    {
        Staged {
            source: self,
            stage,
        }
    }

    /// Reshapes the payload through one typed function
    /// (reorder/drop/rebuild).
    fn map<F>(self, f: F) -> Staged<Self, MapStage<F>>
    where
        Self: Sized,
        F: MapFn<Self::Args> + Clone,
    {
        self.pipe(map(f))
    }

    /// Transforms payload values element-wise; missing trailing functions
    /// pass values through unchanged.
    fn transform<T>(self, transforms: T) -> Staged<Self, TransformStage<T>>
    where
        Self: Sized,
        T: TransformSet<Self::Args> + Clone,
    {
        self.pipe(transform(transforms))
    }

    /// Gates the payload on a predicate (itself arity/conversion adapted);
    /// non-matching events are dropped silently.
    fn filter<B, P>(self, predicate: P) -> Staged<Self, FilterStage<P, B>>
    where
        Self: Sized,
        B: Payload,
        P: Predicate<B> + Clone,
        Self::Args: Narrow<B>,
    {
        self.pipe(filter(predicate))
    }
}

impl<S: Source> SourceExt for S {}

/// A source wrapped in a pipeline stage; itself a source.
#[derive(Clone, Debug)]
pub struct Staged<S, T> {
    pub(crate) source: S,
    pub(crate) stage: T,
}

impl<S, T> Source for Staged<S, T>
where
    S: Source,
    T: Stage<S::Args>,
{
    type Args = T::Output;

    fn connect_raw(&self, slot: RawSlot<T::Output>, options: ConnectOptions) -> Connection {
        self.source.connect_raw(self.stage.adapt(slot), options)
    }
}
