//! Error types for dot-product kernels and the benchmark harness.

use thiserror::Error;

/// Result type alias for kernel operations
pub type Result<T> = std::result::Result<T, DotProductError>;

/// Everything a kernel call or a verification pass can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotProductError {
    /// A SIMD kernel with the `Fail` policy ran on a host without the
    /// widening multiply-accumulate instructions it needs.
    #[error("kernel '{kernel}' requires SIMD support that this CPU does not provide")]
    UnsupportedHardware {
        /// Name of the kernel variant
        kernel: &'static str,
    },

    /// Inputs of unequal length, or a declared length that does not match them.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A variant disagreed with the scalar reference.
    #[error("kernel '{kernel}' failed verification: expected {expected}, got {actual}")]
    Mismatch {
        /// Name of the kernel variant
        kernel: &'static str,
        /// Value produced by the reference kernel
        expected: i32,
        /// Value produced by the variant
        actual: i32,
    },
}
