//! Signals, subscription state and connection handles.
//!
//! This module groups the lifecycle engine:
//! - [`Signal`] / [`SignalSource`] the typed publish point and its
//!   connect-only consumer view
//! - [`Connection`] weak subscription handle (disconnect / suspend /
//!   resume / panic handlers)
//! - [`ScopedConnection`], [`Inhibitor`] RAII companions
//!
//! The copy-on-write storage and dispatch rules live in `core`; the
//! per-subscription lifecycle unit lives in `state`.

mod connection;
mod core;
mod signal;
mod state;

pub use connection::{Connection, Inhibitor, ScopedConnection};
pub use signal::{Signal, SignalSource};

pub(crate) use state::ConnectionOps;
