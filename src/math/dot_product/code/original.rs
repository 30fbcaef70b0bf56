//! Original (reference) implementation of the i16 dot product.
//!
//! A plain per-element loop. It is the oracle every other variant is checked
//! against.

use super::tail::mac;

/// Compute `Σ a[i] * b[i]` with 32-bit wrapping accumulation.
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use i16_dot_bench::math::dot_product::dot_product_original;
///
/// let a = [1, 2, 3];
/// let b = [4, 5, 6];
/// assert_eq!(dot_product_original(&a, &b), 32);
/// ```
pub fn dot_product_original(a: &[i16], b: &[i16]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut result = 0i32;
    for i in 0..a.len() {
        result = mac(result, a[i], b[i]);
    }
    result
}
