//! Portable model of the 128-bit widening lanes.
//!
//! Plain arrays with the exact wrapping semantics of SMLAL/ADDV. Used as the
//! lane type on targets without a SIMD backend, and by the tests to check the
//! accumulator layout on any host.

use super::tail::mac;
use super::widening::{WideningLanes, LANES};

pub struct Emulated;

impl WideningLanes for Emulated {
    type Acc = [i32; LANES];
    type Narrow = [i16; LANES];
    type Wide = [i16; 2 * LANES];

    unsafe fn zero() -> Self::Acc {
        [0; LANES]
    }

    unsafe fn load_narrow(ptr: *const i16) -> Self::Narrow {
        std::ptr::read_unaligned(ptr as *const Self::Narrow)
    }

    unsafe fn load_wide(ptr: *const i16) -> Self::Wide {
        std::ptr::read_unaligned(ptr as *const Self::Wide)
    }

    unsafe fn mlal(mut acc: Self::Acc, a: Self::Narrow, b: Self::Narrow) -> Self::Acc {
        for i in 0..LANES {
            acc[i] = mac(acc[i], a[i], b[i]);
        }
        acc
    }

    unsafe fn mlal_low(acc: Self::Acc, a: Self::Wide, b: Self::Wide) -> Self::Acc {
        Self::mlal(acc, [a[0], a[1], a[2], a[3]], [b[0], b[1], b[2], b[3]])
    }

    unsafe fn mlal_high(acc: Self::Acc, a: Self::Wide, b: Self::Wide) -> Self::Acc {
        Self::mlal(acc, [a[4], a[5], a[6], a[7]], [b[4], b[5], b[6], b[7]])
    }

    unsafe fn add(mut a: Self::Acc, b: Self::Acc) -> Self::Acc {
        for i in 0..LANES {
            a[i] = a[i].wrapping_add(b[i]);
        }
        a
    }

    unsafe fn add_across(acc: Self::Acc) -> i32 {
        acc.iter().fold(0i32, |sum, &lane| sum.wrapping_add(lane))
    }
}
