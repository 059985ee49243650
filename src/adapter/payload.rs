//! Payload tuples and prefix narrowing.
//!
//! [`Payload`] is implemented for tuples of zero to six values. Values must
//! be `Clone` (every subscriber gets its own copy during dispatch) and
//! `Send + 'static` (deferred execution policies may run the callback on
//! another thread, after `publish` has returned).
//!
//! [`Narrow`] is the reduction half of the binding rule: an `n`-ary payload
//! narrows to any `k`-ary prefix of itself (`k <= n`), converting each kept
//! value with [`Into`]. Dropping every value (`k = 0`) and keeping every
//! value (`k = n`) are both ordinary cases, so the same trait also covers
//! "identical types, full arity".

/// A tuple a signal can emit.
///
/// Implemented for `()` through 6-ary tuples whose elements are
/// `Clone + Send + 'static`.
pub trait Payload: Clone + Send + 'static {}

/// Reduction of a payload to a converted prefix of itself.
///
/// `(A0, A1, A2)` narrows to `(B0,)` when `A0: Into<B0>`, and so on for
/// every prefix length. Used by subscription binding, filter predicates,
/// pipeline reuse ([`narrow`](crate::narrow)) and signal forwarding.
///
/// # Example
/// ```rust
/// use sigcast::Narrow;
///
/// let full = (5_i32, "x".to_string(), true);
/// let prefix: (f64,) = full.narrow();
/// assert_eq!(prefix, (5.0,));
/// ```
pub trait Narrow<B: Payload>: Payload {
    /// Consumes the payload, converting the kept prefix and dropping the
    /// rest.
    fn narrow(self) -> B;
}

impl Payload for () {}

macro_rules! impl_payload {
    ($($name:ident),+) => {
        impl<$($name: Clone + Send + 'static),+> Payload for ($($name,)+) {}
    };
}

impl_payload!(A0);
impl_payload!(A0, A1);
impl_payload!(A0, A1, A2);
impl_payload!(A0, A1, A2, A3);
impl_payload!(A0, A1, A2, A3, A4);
impl_payload!(A0, A1, A2, A3, A4, A5);

impl Narrow<()> for () {
    fn narrow(self) {}
}

macro_rules! impl_narrow {
    ($(($a:ident => $b:ident)),* ; $($rest:ident),*) => {
        impl<$($a, $b,)* $($rest,)*> Narrow<($($b,)*)> for ($($a,)* $($rest,)*)
        where
            $($a: Into<$b> + Clone + Send + 'static,)*
            $($b: Clone + Send + 'static,)*
            $($rest: Clone + Send + 'static,)*
        {
            #[allow(non_snake_case, unused_variables)]
            fn narrow(self) -> ($($b,)*) {
                let ($($a,)* $($rest,)*) = self;
                ($($a.into(),)*)
            }
        }
    };
}

impl_narrow!( ; A0);
impl_narrow!((A0 => B0) ; );
impl_narrow!( ; A0, A1);
impl_narrow!((A0 => B0) ; A1);
impl_narrow!((A0 => B0), (A1 => B1) ; );
impl_narrow!( ; A0, A1, A2);
impl_narrow!((A0 => B0) ; A1, A2);
impl_narrow!((A0 => B0), (A1 => B1) ; A2);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2) ; );
impl_narrow!( ; A0, A1, A2, A3);
impl_narrow!((A0 => B0) ; A1, A2, A3);
impl_narrow!((A0 => B0), (A1 => B1) ; A2, A3);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2) ; A3);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2), (A3 => B3) ; );
impl_narrow!( ; A0, A1, A2, A3, A4);
impl_narrow!((A0 => B0) ; A1, A2, A3, A4);
impl_narrow!((A0 => B0), (A1 => B1) ; A2, A3, A4);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2) ; A3, A4);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2), (A3 => B3) ; A4);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2), (A3 => B3), (A4 => B4) ; );
impl_narrow!( ; A0, A1, A2, A3, A4, A5);
impl_narrow!((A0 => B0) ; A1, A2, A3, A4, A5);
impl_narrow!((A0 => B0), (A1 => B1) ; A2, A3, A4, A5);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2) ; A3, A4, A5);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2), (A3 => B3) ; A4, A5);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2), (A3 => B3), (A4 => B4) ; A5);
impl_narrow!((A0 => B0), (A1 => B1), (A2 => B2), (A3 => B3), (A4 => B4), (A5 => B5) ; );
