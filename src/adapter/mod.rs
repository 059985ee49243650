//! Payload vocabulary and callback adaptation.
//!
//! Signals carry their payload as a tuple. This module defines the traits
//! that decide, at compile time, whether and how a user callback may bind to
//! a payload:
//!
//! - [`Payload`] — the tuple types a signal can emit (zero to six values);
//! - [`Narrow`] — reduces a payload to a converted prefix of itself;
//! - [`SlotFn`] — plain functions/closures viewed as subscribers;
//! - [`Predicate`] — plain functions/closures viewed as filter gates.
//!
//! ## Binding rule
//! A callback taking `k` parameters binds to an `n`-ary payload when
//! `k <= n` and every emitted value converts into the matching parameter
//! (`Into`, which covers identical types). The trailing `n - k` values are
//! dropped. A callback only ever has one arity, so the widest successful
//! binding is the callback's own parameter list; anything else fails to
//! compile.
//!
//! Conversions make the callback's parameter types part of trait selection,
//! so closure parameters must be written out (`|v: i32| ...`). Function
//! items need nothing extra.

mod payload;
mod predicate;
mod slot;

pub use payload::{Narrow, Payload};
pub use predicate::Predicate;
pub use slot::{RawSlot, SlotFn};

pub(crate) use slot::adapt_slot;
