//! Tail handling shared by every kernel.
//!
//! Whatever the unroll width, the elements a main loop leaves behind are
//! finished here with the same scalar step the reference kernel uses, so tail
//! semantics cannot drift between variants.

/// One scalar multiply-accumulate step.
///
/// The product of two `i16` values always fits in an `i32`
/// (`(-32768)^2 = 2^30`); only the running sum wraps.
#[inline(always)]
pub fn mac(acc: i32, x: i16, y: i16) -> i32 {
    acc.wrapping_add(i32::from(x) * i32::from(y))
}

/// Accumulate `a[start..] · b[start..]` into `result`, in index order.
///
/// `a` and `b` must have the same length and `start <= a.len()`.
#[inline(always)]
pub fn finish(result: i32, a: &[i16], b: &[i16], start: usize) -> i32 {
    debug_assert_eq!(a.len(), b.len());
    a[start..]
        .iter()
        .zip(&b[start..])
        .fold(result, |acc, (&x, &y)| mac(acc, x, y))
}
