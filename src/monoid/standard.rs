//! Stock monoids

use super::Monoid;

/// Wrapping sum over `i64`
#[derive(Debug, Clone, Copy)]
pub struct Sum;

impl Monoid for Sum {
    type Value = i64;

    fn identity() -> i64 {
        0
    }

    fn combine(a: &i64, b: &i64) -> i64 {
        a.wrapping_add(*b)
    }
}

/// Minimum over `i64`
#[derive(Debug, Clone, Copy)]
pub struct Min;

impl Monoid for Min {
    type Value = i64;

    fn identity() -> i64 {
        i64::MAX
    }

    fn combine(a: &i64, b: &i64) -> i64 {
        *a.min(b)
    }
}

/// Maximum over `i64`
#[derive(Debug, Clone, Copy)]
pub struct Max;

impl Monoid for Max {
    type Value = i64;

    fn identity() -> i64 {
        i64::MIN
    }

    fn combine(a: &i64, b: &i64) -> i64 {
        *a.max(b)
    }
}

/// Componentwise maximum over pairs, identity `(-inf, -inf)`
#[derive(Debug, Clone, Copy)]
pub struct MaxPair;

impl Monoid for MaxPair {
    type Value = (i64, i64);

    fn identity() -> (i64, i64) {
        (i64::MIN, i64::MIN)
    }

    fn combine(a: &(i64, i64), b: &(i64, i64)) -> (i64, i64) {
        (a.0.max(b.0), a.1.max(b.1))
    }
}

/// String concatenation; associative but not commutative
#[derive(Debug, Clone, Copy)]
pub struct Concat;

impl Monoid for Concat {
    type Value = String;

    fn identity() -> String {
        String::new()
    }

    fn combine(a: &String, b: &String) -> String {
        let mut out = String::with_capacity(a.len() + b.len());
        out.push_str(a);
        out.push_str(b);
        out
    }
}
