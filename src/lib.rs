//! # i16-dot-bench
//!
//! Dot products of `i16` vectors into an `i32` accumulator, from a scalar
//! reference loop to unrolled widening multiply-accumulate SIMD kernels, plus
//! the harness that times them over many trials.

pub mod error;
pub mod math;
pub mod utils;

/// Report rendering, also reachable as `utils::tui`
pub use utils::tui;

pub use error::{DotProductError, Result};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::math::dot_product;
    pub use crate::math::dot_product::{available_variants, Generation, Kernel, Report};
    pub use crate::utils::timer::{LoopMode, TimingConfig};
    pub use crate::utils::SimdCapability;
}
