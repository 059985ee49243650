//! Callbacks viewed as filter gates.
//!
//! Same per-arity scheme as [`SlotFn`](super::SlotFn), for callables
//! returning `bool`. Filter stages narrow the payload before asking the
//! predicate, so a predicate over a converted prefix of the stream binds
//! exactly like a subscriber does.

/// A function or closure usable as a predicate for the parameter tuple `B`.
pub trait Predicate<B: crate::Payload>: Send + Sync + 'static {
    /// Tests an already-narrowed argument tuple.
    fn test(&self, args: B) -> bool;
}

impl<F> Predicate<()> for F
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn test(&self, _args: ()) -> bool {
        self()
    }
}

macro_rules! impl_predicate {
    ($($b:ident),+) => {
        impl<F, $($b),+> Predicate<($($b,)+)> for F
        where
            F: Fn($($b),+) -> bool + Send + Sync + 'static,
            $($b: Clone + Send + 'static,)+
        {
            #[allow(non_snake_case)]
            fn test(&self, args: ($($b,)+)) -> bool {
                let ($($b,)+) = args;
                self($($b),+)
            }
        }
    };
}

impl_predicate!(B0);
impl_predicate!(B0, B1);
impl_predicate!(B0, B1, B2);
impl_predicate!(B0, B1, B2, B3);
impl_predicate!(B0, B1, B2, B3, B4);
impl_predicate!(B0, B1, B2, B3, B4, B5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_arity() {
        fn is_even(value: i32) -> bool {
            value % 2 == 0
        }
        assert!(Predicate::test(&is_even, (4,)));
        assert!(!Predicate::test(&is_even, (5,)));

        let both = |a: i32, b: i32| a < b;
        assert!(Predicate::test(&both, (1, 2)));
    }
}
