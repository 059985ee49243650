//! Transformation pipelines over signal sources.
//!
//! This module groups everything between a signal and a subscription:
//!
//! ## Contents
//! - [`Source`] / [`SourceExt`] the subscribe surface every signal-like
//!   type exposes
//! - [`Stage`] / [`Chainable`] unbound payload rewrites and their
//!   composition
//! - [`map`] / [`narrow`] reorder, drop, reshape
//! - [`transform`] element-wise value transforms with identity padding
//! - [`filter`] predicate gates with adapted predicates
//! - [`Bind`] / [`Chain`] reusable subscription terminals
//! - [`Forward`] republish one source's events on another signal
//!
//! ## Quick wiring
//! ```text
//! signal.source().filter(p).map(f).connect(cb)      // inline pipeline
//!
//! let chain = narrow::<(i32,)>()                    // unbound pipeline,
//!     .then(filter(p))                              // reusable across
//!     .then(transform((f,)))                        // compatible sources
//!     .bind(Bind::new(cb).guarded(&guard));
//! chain.apply(&signal_a);
//! chain.apply(&signal_b);
//! ```
//!
//! Stages adapt *subscribers*, not events: an unbound stage does nothing
//! until a subscription pins it to a source, and each application is an
//! independent live subscription.

mod chain;
mod filter;
mod forward;
mod map;
mod source;
mod stage;
mod transform;

pub use chain::{Bind, Chain};
pub use filter::{filter, FilterStage};
pub use forward::Forward;
pub use map::{map, narrow, MapFn, MapStage, NarrowStage};
pub use source::{ConnectOptions, Source, SourceExt, Staged};
pub use stage::{Chainable, Composed, Stage};
pub use transform::{transform, TransformSet, TransformStage};
