//! x86_64 SSE2 lane primitives.
//!
//! SSE2 has no single widening multiply-accumulate, so SMLAL is built from
//! PMULLW/PMULHW: the low and high 16 bits of each product are interleaved back
//! into full 32-bit products with PUNPCKLWD (lanes 0..4) or PUNPCKHWD (lanes
//! 4..8, the SMLAL2 half). SSE2 is available on all x86_64 CPUs.

use std::arch::x86_64::*;

use super::widening::WideningLanes;

pub struct Sse2;

impl WideningLanes for Sse2 {
    type Acc = __m128i;
    // Four i16 in the low 64 bits.
    type Narrow = __m128i;
    type Wide = __m128i;

    #[inline(always)]
    unsafe fn zero() -> __m128i {
        _mm_setzero_si128()
    }

    #[inline(always)]
    unsafe fn load_narrow(ptr: *const i16) -> __m128i {
        _mm_loadl_epi64(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn load_wide(ptr: *const i16) -> __m128i {
        _mm_loadu_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn mlal(acc: __m128i, a: __m128i, b: __m128i) -> __m128i {
        Self::mlal_low(acc, a, b)
    }

    #[inline(always)]
    unsafe fn mlal_low(acc: __m128i, a: __m128i, b: __m128i) -> __m128i {
        let lo = _mm_mullo_epi16(a, b);
        let hi = _mm_mulhi_epi16(a, b);
        _mm_add_epi32(acc, _mm_unpacklo_epi16(lo, hi))
    }

    #[inline(always)]
    unsafe fn mlal_high(acc: __m128i, a: __m128i, b: __m128i) -> __m128i {
        let lo = _mm_mullo_epi16(a, b);
        let hi = _mm_mulhi_epi16(a, b);
        _mm_add_epi32(acc, _mm_unpackhi_epi16(lo, hi))
    }

    #[inline(always)]
    unsafe fn add(a: __m128i, b: __m128i) -> __m128i {
        _mm_add_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn add_across(acc: __m128i) -> i32 {
        // [a, b, c, d] -> [a+c, b+d, ..] -> [a+b+c+d, ..]
        let swapped = _mm_shuffle_epi32(acc, 0b01_00_11_10);
        let pairs = _mm_add_epi32(acc, swapped);
        let shifted = _mm_shuffle_epi32(pairs, 0b10_11_00_01);
        _mm_cvtsi128_si32(_mm_add_epi32(pairs, shifted))
    }
}
