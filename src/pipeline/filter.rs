//! # Predicate gates.
//!
//! [`filter`] forwards the untouched payload downstream only when the
//! predicate holds; non-matching events are dropped silently, never an
//! error. The predicate goes through the same arity/conversion adaptation
//! as a subscriber, so a one-parameter predicate gates a two-parameter
//! stream on its first value alone.

use std::marker::PhantomData;

use crate::adapter::{Narrow, Payload, Predicate, RawSlot};

use super::stage::{Chainable, Stage};

/// Stage produced by [`filter`].
pub struct FilterStage<P, B> {
    predicate: P,
    marker: PhantomData<fn(B)>,
}

impl<P: Clone, B> Clone for FilterStage<P, B> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            marker: PhantomData,
        }
    }
}

impl<P, B> std::fmt::Debug for FilterStage<P, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FilterStage")
    }
}

/// Creates an unbound predicate gate.
///
/// ```rust
/// use sigcast::{Signal, SourceExt};
/// use std::sync::{Arc, Mutex};
///
/// let signal = Signal::<(i32, String)>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// signal
///     .source()
///     .filter(|n: i32| n % 2 == 0) // gates on the first value only
///     .connect(move |_n: i32, s: String| sink.lock().unwrap().push(s));
///
/// signal.publish((1, "odd".to_string()));
/// signal.publish((2, "even".to_string()));
/// assert_eq!(seen.lock().unwrap().as_slice(), ["even".to_string()]);
/// ```
pub fn filter<B, P>(predicate: P) -> FilterStage<P, B>
where
    B: Payload,
    P: Predicate<B>,
{
    FilterStage {
        predicate,
        marker: PhantomData,
    }
}

impl<A, B, P> Stage<A> for FilterStage<P, B>
where
    A: Narrow<B>,
    B: Payload,
    P: Predicate<B> + Clone,
{
    type Output = A;

    fn adapt(&self, inner: RawSlot<A>) -> RawSlot<A> {
        let predicate = self.predicate.clone();
        Box::new(move |args: A| {
            if predicate.test(args.clone().narrow()) {
                inner(args);
            }
        })
    }
}

impl<P, B> Chainable for FilterStage<P, B> {}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::{Signal, SourceExt};

    use super::*;

    #[test]
    fn test_filter_drops_non_matching_silently() {
        let signal = Signal::<(i32,)>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        signal
            .source()
            .filter(|n: i32| n > 0)
            .connect(move |n: i32| sink.lock().unwrap().push(n));

        for n in [-2, 5, 0, 3] {
            signal.publish((n,));
        }
        assert_eq!(seen.lock().unwrap().as_slice(), [5, 3]);
    }

    #[test]
    fn test_predicate_is_arity_adapted() {
        let signal = Signal::<(i32, String)>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        // Zero-parameter predicate: a pure on/off gate.
        let open = Arc::new(Mutex::new(false));
        let gate = Arc::clone(&open);
        let sink = Arc::clone(&seen);
        signal
            .source()
            .filter(move || *gate.lock().unwrap())
            .connect(move |_n: i32, s: String| sink.lock().unwrap().push(s));

        signal.publish((1, "closed".to_string()));
        *open.lock().unwrap() = true;
        signal.publish((2, "open".to_string()));

        assert_eq!(seen.lock().unwrap().as_slice(), ["open".to_string()]);
    }

    #[test]
    fn test_filtered_payload_passes_through_untouched() {
        let signal = Signal::<(i32, String)>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        signal
            .source()
            .filter(|n: i32| n % 2 == 0)
            .connect(move |n: i32, s: String| sink.lock().unwrap().push((n, s)));

        signal.publish((2, "two".to_string()));
        assert_eq!(seen.lock().unwrap().as_slice(), [(2, "two".to_string())]);
    }
}
