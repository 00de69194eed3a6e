//! Associative operator capability
//!
//! A [`Monoid`] supplies the element type stored in the tree together with
//! an associative `combine` and its two-sided `identity`. The tree always
//! folds left to right, so commutativity is never assumed.
//!
//! Laws (documented preconditions, not checked by the type system):
//! - `combine(combine(a, b), c) == combine(a, combine(b, c))`
//! - `combine(identity(), a) == a == combine(a, identity())`

mod standard;

pub use standard::{Concat, Max, MaxPair, Min, Sum};

/// Associative operator with identity over `Self::Value`
pub trait Monoid {
    /// Element type
    type Value: Clone;

    /// Two-sided identity element
    fn identity() -> Self::Value;

    /// Associative combination, `a` on the left
    fn combine(a: &Self::Value, b: &Self::Value) -> Self::Value;
}

/// Left-to-right fold of `values`; the identity for an empty input
pub fn fold<'a, M, I>(values: I) -> M::Value
where
    M: Monoid,
    M::Value: 'a,
    I: IntoIterator<Item = &'a M::Value>,
{
    values
        .into_iter()
        .fold(M::identity(), |acc, value| M::combine(&acc, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_empty_is_identity() {
        assert_eq!(fold::<Sum, _>(&[]), 0);
        assert_eq!(fold::<Concat, _>(&[]), String::new());
    }

    #[test]
    fn test_fold_keeps_order() {
        let words = ["ab".to_string(), "c".to_string(), "de".to_string()];
        assert_eq!(fold::<Concat, _>(&words), "abcde");
    }
}
