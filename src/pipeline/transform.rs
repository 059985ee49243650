//! # Element-wise value transforms.
//!
//! [`transform`] takes a tuple of functions and applies the i-th function
//! to the i-th payload value. Fewer functions than values is fine: the
//! remaining trailing values pass through unchanged.
//!
//! ```rust
//! use sigcast::{Signal, SourceExt};
//! use std::sync::{Arc, Mutex};
//!
//! let signal = Signal::<(i32, i32)>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! signal
//!     .source()
//!     .transform((|n: i32| n.to_string(),)) // second value passes through
//!     .connect(move |s: String, n: i32| sink.lock().unwrap().push((s, n)));
//!
//! signal.publish((5, 9));
//! assert_eq!(seen.lock().unwrap().as_slice(), [("5".to_string(), 9)]);
//! ```

use crate::adapter::{Payload, RawSlot};

use super::stage::{Chainable, Stage};

/// A tuple of functions applied element-wise to a payload, with identity
/// padding for the untouched trailing values.
///
/// Implemented for function tuples `(F0,)` through `(F0, ..., F5)` against
/// payloads of matching or greater arity.
pub trait TransformSet<A: Payload>: Send + Sync + 'static {
    /// The transformed payload.
    type Output: Payload;

    /// Applies every function to its value, passing the rest through.
    fn apply(&self, args: A) -> Self::Output;
}

macro_rules! impl_transform_set {
    ($(($f:ident, $a:ident, $b:ident)),+ ; $($rest:ident),*) => {
        impl<$($f, $a, $b,)+ $($rest,)*> TransformSet<($($a,)+ $($rest,)*)> for ($($f,)+)
        where
            $($f: Fn($a) -> $b + Send + Sync + 'static,)+
            $($a: Clone + Send + 'static,)+
            $($b: Clone + Send + 'static,)+
            $($rest: Clone + Send + 'static,)*
        {
            type Output = ($($b,)+ $($rest,)*);

            #[allow(non_snake_case)]
            fn apply(&self, args: ($($a,)+ $($rest,)*)) -> Self::Output {
                let ($($f,)+) = self;
                let ($($a,)+ $($rest,)*) = args;
                ($($f($a),)+ $($rest,)*)
            }
        }
    };
}

impl_transform_set!((F0, A0, B0) ; );
impl_transform_set!((F0, A0, B0) ; A1);
impl_transform_set!((F0, A0, B0) ; A1, A2);
impl_transform_set!((F0, A0, B0) ; A1, A2, A3);
impl_transform_set!((F0, A0, B0) ; A1, A2, A3, A4);
impl_transform_set!((F0, A0, B0) ; A1, A2, A3, A4, A5);
impl_transform_set!((F0, A0, B0), (F1, A1, B1) ; );
impl_transform_set!((F0, A0, B0), (F1, A1, B1) ; A2);
impl_transform_set!((F0, A0, B0), (F1, A1, B1) ; A2, A3);
impl_transform_set!((F0, A0, B0), (F1, A1, B1) ; A2, A3, A4);
impl_transform_set!((F0, A0, B0), (F1, A1, B1) ; A2, A3, A4, A5);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2) ; );
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2) ; A3);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2) ; A3, A4);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2) ; A3, A4, A5);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2), (F3, A3, B3) ; );
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2), (F3, A3, B3) ; A4);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2), (F3, A3, B3) ; A4, A5);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2), (F3, A3, B3), (F4, A4, B4) ; );
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2), (F3, A3, B3), (F4, A4, B4) ; A5);
impl_transform_set!((F0, A0, B0), (F1, A1, B1), (F2, A2, B2), (F3, A3, B3), (F4, A4, B4), (F5, A5, B5) ; );

/// Stage produced by [`transform`].
#[derive(Clone, Debug)]
pub struct TransformStage<T> {
    transforms: T,
}

/// Creates an unbound element-wise transform stage from a tuple of
/// functions (a single transform is the 1-tuple `(f,)`).
pub fn transform<T>(transforms: T) -> TransformStage<T> {
    TransformStage { transforms }
}

impl<A, T> Stage<A> for TransformStage<T>
where
    A: Payload,
    T: TransformSet<A> + Clone,
{
    type Output = T::Output;

    fn adapt(&self, inner: RawSlot<T::Output>) -> RawSlot<A> {
        let transforms = self.transforms.clone();
        Box::new(move |args: A| inner(transforms.apply(args)))
    }
}

impl<T> Chainable for TransformStage<T> {}
