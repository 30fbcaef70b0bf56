//! aarch64 NEON lane primitives.
//!
//! Maps the widening reduction onto SMLAL (`vmlal_s16`), SMLAL2
//! (`vmlal_high_s16`) and ADDV (`vaddvq_s32`).

use std::arch::aarch64::*;

use super::widening::WideningLanes;

pub struct Neon;

impl WideningLanes for Neon {
    type Acc = int32x4_t;
    type Narrow = int16x4_t;
    type Wide = int16x8_t;

    #[inline(always)]
    unsafe fn zero() -> int32x4_t {
        vdupq_n_s32(0)
    }

    #[inline(always)]
    unsafe fn load_narrow(ptr: *const i16) -> int16x4_t {
        vld1_s16(ptr)
    }

    #[inline(always)]
    unsafe fn load_wide(ptr: *const i16) -> int16x8_t {
        vld1q_s16(ptr)
    }

    #[inline(always)]
    unsafe fn mlal(acc: int32x4_t, a: int16x4_t, b: int16x4_t) -> int32x4_t {
        vmlal_s16(acc, a, b)
    }

    #[inline(always)]
    unsafe fn mlal_low(acc: int32x4_t, a: int16x8_t, b: int16x8_t) -> int32x4_t {
        vmlal_s16(acc, vget_low_s16(a), vget_low_s16(b))
    }

    #[inline(always)]
    unsafe fn mlal_high(acc: int32x4_t, a: int16x8_t, b: int16x8_t) -> int32x4_t {
        vmlal_high_s16(acc, a, b)
    }

    #[inline(always)]
    unsafe fn add(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vaddq_s32(a, b)
    }

    #[inline(always)]
    unsafe fn add_across(acc: int32x4_t) -> i32 {
        vaddvq_s32(acc)
    }
}
