//! Generic widening multiply-accumulate reduction.
//!
//! Every SIMD variant is one instantiation of [`widening_dot`], keyed by the
//! lane primitives of the target ISA, the number of accumulators and the load
//! strategy. Accumulator `k` always owns elements `4k..4k + 4` of each
//! unrolled block, whichever way they were loaded.

use super::tail::finish;

/// Number of `i32` lanes in one 128-bit accumulator.
pub const LANES: usize = 4;

/// ISA primitives over a 128-bit register of four `i32` lanes.
///
/// `Narrow` holds four `i16` values, `Wide` holds eight.
///
/// # Safety
/// Implementations may execute instructions that only exist when
/// `SimdCapability::has_widening_mac` is true. Load functions read 4 (narrow)
/// or 8 (wide) `i16` values from an unaligned pointer.
pub trait WideningLanes {
    type Acc: Copy;
    type Narrow: Copy;
    type Wide: Copy;

    unsafe fn zero() -> Self::Acc;
    unsafe fn load_narrow(ptr: *const i16) -> Self::Narrow;
    unsafe fn load_wide(ptr: *const i16) -> Self::Wide;
    /// `acc[i] += a[i] * b[i]` for the four lanes (SMLAL).
    unsafe fn mlal(acc: Self::Acc, a: Self::Narrow, b: Self::Narrow) -> Self::Acc;
    /// SMLAL on lanes 0..4 of wide registers.
    unsafe fn mlal_low(acc: Self::Acc, a: Self::Wide, b: Self::Wide) -> Self::Acc;
    /// SMLAL2 on lanes 4..8 of wide registers.
    unsafe fn mlal_high(acc: Self::Acc, a: Self::Wide, b: Self::Wide) -> Self::Acc;
    unsafe fn add(a: Self::Acc, b: Self::Acc) -> Self::Acc;
    /// Full horizontal add (ADDV).
    unsafe fn add_across(acc: Self::Acc) -> i32;
}

/// Dot product with `ACC` accumulators and `ACC * 4` elements per iteration.
///
/// With `SPLIT` the inputs are read as 8-lane registers and each one feeds two
/// accumulators through its low and high halves, so `ACC` must be even.
///
/// # Safety
/// `a` and `b` must have the same length and the host must support the
/// instructions used by `L`.
#[inline(always)]
pub unsafe fn widening_dot<L: WideningLanes, const ACC: usize, const SPLIT: bool>(
    a: &[i16],
    b: &[i16],
) -> i32 {
    debug_assert_eq!(a.len(), b.len());
    debug_assert!(ACC > 0 && (!SPLIT || ACC % 2 == 0));

    let width = ACC * LANES;
    let iterations = a.len() / width;

    let mut acc = [L::zero(); ACC];
    let mut pa = a.as_ptr();
    let mut pb = b.as_ptr();

    for _ in 0..iterations {
        if SPLIT {
            for pair in 0..ACC / 2 {
                let va = L::load_wide(pa.add(pair * 2 * LANES));
                let vb = L::load_wide(pb.add(pair * 2 * LANES));
                acc[2 * pair] = L::mlal_low(acc[2 * pair], va, vb);
                acc[2 * pair + 1] = L::mlal_high(acc[2 * pair + 1], va, vb);
            }
        } else {
            for (k, partial) in acc.iter_mut().enumerate() {
                let va = L::load_narrow(pa.add(k * LANES));
                let vb = L::load_narrow(pb.add(k * LANES));
                *partial = L::mlal(*partial, va, vb);
            }
        }
        pa = pa.add(width);
        pb = pb.add(width);
    }

    let mut combined = acc[0];
    for partial in &acc[1..] {
        combined = L::add(combined, *partial);
    }

    finish(L::add_across(combined), a, b, iterations * width)
}
