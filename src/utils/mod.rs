//! Utility modules for benchmarking and execution.

pub mod cpu_affinity;
pub mod cpu_features;
pub mod timer;
pub mod tui;

pub use cpu_affinity::CpuPinGuard;
pub use cpu_features::SimdCapability;
pub use timer::{measure_variants, LoopMode, PinStrategy, TimingConfig, TrialMeasurement, Variant};

/// C compiler name detected at build time
pub const C_COMPILER_NAME: Option<&str> = option_env!("C_COMPILER_NAME");

/// Information about an algorithm implementation variant.
/// Generic over F which is the function signature.
#[derive(Clone, Copy)]
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "original", "simd_x4")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
