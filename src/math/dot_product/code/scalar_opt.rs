//! Scalar implementation written for the auto-vectorizer.
//!
//! No intrinsics: eight independent `i32` lanes are updated per step, which
//! LLVM turns into whatever vector code the target baseline allows. This is the
//! "same scalar source, smarter compiler" point of comparison.

use super::tail::{finish, mac};

const LANES: usize = 8;

/// Compute the dot product with 8 independent scalar accumulators.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_scalar_opt(a: &[i16], b: &[i16]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut lanes = [0i32; LANES];
    for (ca, cb) in a.chunks_exact(LANES).zip(b.chunks_exact(LANES)) {
        for k in 0..LANES {
            lanes[k] = mac(lanes[k], ca[k], cb[k]);
        }
    }

    let result = lanes.iter().fold(0i32, |acc, &lane| acc.wrapping_add(lane));
    finish(result, a, b, a.len() - a.len() % LANES)
}
