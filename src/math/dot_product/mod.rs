//! # Dot Product Algorithm (i16 inputs, i32 accumulator)
//!
//! `dot(a, b) = Σ(a[i] * b[i])`, each product widened to 32 bits and the
//! running sum wrapping on overflow. Every variant returns exactly the same
//! value as the scalar reference, overflow included.
//!
//! ## Optimization Strategies
//!
//! - **Widening multiply-accumulate**: SMLAL on NEON (PMULLW/PMULHW + unpack on
//!   SSE2) multiplies four `i16` lanes into four `i32` partial sums
//! - **Loop unrolling**: 1 to 6 independent accumulators break the dependency
//!   chain between iterations
//! - **Split loads**: one 128-bit load feeds two accumulators through its low
//!   and high halves (SMLAL + SMLAL2), halving the load count

pub mod bench;
pub mod code;
#[cfg(test)]
mod test;

pub use bench::{generate_ramp, run, run_with, Report};
pub use code::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DotProductError, Result};
use crate::utils::cpu_features::SimdCapability;

/// Check every variant of both generations against `original`.
///
/// Uses random full-range inputs of a length that is not a multiple of any
/// unroll width, plus the reference ramp.
pub fn verify(capability: SimdCapability) -> Result<()> {
    // 1023 = 24 * 42 + 15: every width leaves a tail.
    const SIZE: u16 = 1023;

    let mut rng = StdRng::seed_from_u64(0x5EED_D07);
    let random_a: Vec<i16> = (0..SIZE).map(|_| rng.random()).collect();
    let random_b: Vec<i16> = (0..SIZE).map(|_| rng.random()).collect();
    let ramp_a = generate_ramp(0, bench::DEFAULT_LENGTH);
    let ramp_b = generate_ramp(bench::SECOND_RAMP_START, bench::DEFAULT_LENGTH);

    for (a, b) in [(&random_a, &random_b), (&ramp_a, &ramp_b)] {
        let length = u16::try_from(a.len())
            .map_err(|_| DotProductError::InvalidArgument("input too long".into()))?;
        let expected = dot_product_original(a, b);

        for generation in [Generation::SingleShot, Generation::TrialLoop] {
            for kernel in available_variants(capability, generation) {
                if kernel.requires_simd() && !capability.has_widening_mac() {
                    continue;
                }
                let actual = kernel.compute(a, b, length)?;
                if actual != expected {
                    return Err(DotProductError::Mismatch {
                        kernel: kernel.name(),
                        expected,
                        actual,
                    });
                }
            }
        }
    }

    Ok(())
}
