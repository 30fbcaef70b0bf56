//! Dot product implementations.
//!
//! This module contains every kernel variant and the uniform [`Kernel`]
//! contract the harness calls them through.

pub mod c_impl;
pub mod emulated;
mod original;
mod scalar_opt;
pub mod tail;
pub mod widening;

#[cfg(target_arch = "aarch64")]
mod aarch64_neon;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2;

pub use c_impl::C_IMPL_AVAILABLE;
#[cfg(c_implementation_active)]
pub use c_impl::dot_product_c_original;
pub use original::dot_product_original;
pub use scalar_opt::dot_product_scalar_opt;
pub use widening::{widening_dot, WideningLanes};

use std::fmt;
use std::hint::black_box;

use crate::error::{DotProductError, Result};
use crate::utils::cpu_features::SimdCapability;
use crate::utils::VariantInfo;

#[cfg(target_arch = "aarch64")]
type Isa = aarch64_neon::Neon;
#[cfg(target_arch = "x86_64")]
type Isa = x86_64_sse2::Sse2;
// Never executed: the capability is unavailable on these targets.
#[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
type Isa = emulated::Emulated;

/// Raw kernel body. Callers must pass equal-length slices and, for SIMD
/// bodies, must have checked the capability.
pub type KernelBody = unsafe fn(&[i16], &[i16]) -> i32;

/// Value returned by `Sentinel` kernels on hosts without SIMD support.
pub const SENTINEL: i32 = 0;

/// What a SIMD kernel does when the host lacks the instructions it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Abort the call with [`DotProductError::UnsupportedHardware`].
    Fail,
    /// Skip the computation and return [`SENTINEL`].
    Sentinel,
}

/// The two kernel generations: one call per trial, or the trial loop moved
/// inside the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// Hard dependency on SIMD; unsupported hardware is an error.
    SingleShot,
    /// Meant to run unconditionally in a sweep; unsupported hardware yields 0.
    TrialLoop,
}

impl Generation {
    pub const fn policy(self) -> UnsupportedPolicy {
        match self {
            Generation::SingleShot => UnsupportedPolicy::Fail,
            Generation::TrialLoop => UnsupportedPolicy::Sentinel,
        }
    }
}

/// How a widening kernel fills its accumulators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStrategy {
    /// One 4-lane load per accumulator and operand.
    Narrow,
    /// One 8-lane load per pair of accumulators, split into low/high halves.
    Split,
}

/// Structural description of a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Portable Rust scalar code.
    Scalar,
    /// Scalar code built by the native C compiler.
    Native,
    /// Widening multiply-accumulate over 128-bit registers.
    Widening {
        accumulators: usize,
        loads: LoadStrategy,
    },
}

impl Shape {
    /// Elements consumed per main-loop iteration.
    pub const fn width(self) -> usize {
        match self {
            Shape::Scalar | Shape::Native => 1,
            Shape::Widening { accumulators, .. } => accumulators * widening::LANES,
        }
    }

    pub const fn requires_simd(self) -> bool {
        matches!(self, Shape::Widening { .. })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Native => write!(f, "scalar (C)"),
            Shape::Widening {
                accumulators,
                loads,
            } => {
                let loads = match loads {
                    LoadStrategy::Narrow => "narrow",
                    LoadStrategy::Split => "split",
                };
                write!(f, "W={} acc={} {}", self.width(), accumulators, loads)
            }
        }
    }
}

/// A kernel variant bound to the capability of the host it will run on.
#[derive(Clone, Copy)]
pub struct Kernel {
    info: VariantInfo<KernelBody>,
    shape: Shape,
    policy: UnsupportedPolicy,
    capability: SimdCapability,
}

impl Kernel {
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    pub fn description(&self) -> &'static str {
        self.info.description
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn policy(&self) -> UnsupportedPolicy {
        self.policy
    }

    pub fn capability(&self) -> SimdCapability {
        self.capability
    }

    pub fn requires_simd(&self) -> bool {
        self.shape.requires_simd()
    }

    /// Compute the dot product of the first `length` elements once.
    pub fn compute(&self, a: &[i16], b: &[i16], length: u16) -> Result<i32> {
        self.compute_trials(a, b, length, 1)
    }

    /// Compute the dot product `trials` times and return the last result.
    ///
    /// Every trial starts from fresh accumulators. With `trials == 0` nothing
    /// is computed and the result is 0.
    ///
    /// # Errors
    /// [`DotProductError::InvalidArgument`] when `a`, `b` and `length`
    /// disagree. [`DotProductError::UnsupportedHardware`] when this is a SIMD
    /// kernel with the `Fail` policy and the capability is unavailable.
    pub fn compute_trials(&self, a: &[i16], b: &[i16], length: u16, trials: u32) -> Result<i32> {
        check_inputs(a, b, length)?;

        if self.requires_simd() && !self.capability.has_widening_mac() {
            return match self.policy {
                UnsupportedPolicy::Fail => Err(DotProductError::UnsupportedHardware {
                    kernel: self.name(),
                }),
                UnsupportedPolicy::Sentinel => Ok(SENTINEL),
            };
        }

        let body = self.info.function;
        let mut result = 0;
        for _ in 0..trials {
            // SAFETY: lengths were validated above, and SIMD bodies only get
            // here when the capability was detected on this host.
            result = black_box(unsafe { body(black_box(a), black_box(b)) });
        }
        Ok(result)
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.info.name)
            .field("shape", &self.shape)
            .field("policy", &self.policy)
            .field("capability", &self.capability)
            .finish()
    }
}

fn check_inputs(a: &[i16], b: &[i16], length: u16) -> Result<()> {
    if a.len() != b.len() {
        return Err(DotProductError::InvalidArgument(format!(
            "input vectors differ in length: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.len() != usize::from(length) {
        return Err(DotProductError::InvalidArgument(format!(
            "declared length {} does not match input length {}",
            length,
            a.len()
        )));
    }
    Ok(())
}

struct Descriptor {
    name: &'static str,
    description: &'static str,
    shape: Shape,
    body: KernelBody,
}

const fn widening(accumulators: usize, loads: LoadStrategy) -> Shape {
    Shape::Widening {
        accumulators,
        loads,
    }
}

fn descriptors() -> Vec<Descriptor> {
    use LoadStrategy::{Narrow, Split};

    let mut table = vec![
        Descriptor {
            name: "original",
            description: "Scalar reference loop",
            shape: Shape::Scalar,
            body: dot_product_original,
        },
        Descriptor {
            name: "scalar_opt",
            description: "Scalar, 8 independent lanes for the auto-vectorizer",
            shape: Shape::Scalar,
            body: dot_product_scalar_opt,
        },
    ];

    if C_IMPL_AVAILABLE {
        table.push(Descriptor {
            name: "c-original",
            description: "Scalar reference compiled by the native C compiler",
            shape: Shape::Native,
            body: c_impl::dot_product_c_original,
        });
    }

    table.extend([
        Descriptor {
            name: "simd_x1",
            description: "SMLAL, no unrolling",
            shape: widening(1, Narrow),
            body: widening_dot::<Isa, 1, false>,
        },
        Descriptor {
            name: "simd_x2",
            description: "SMLAL, 2x unrolling",
            shape: widening(2, Narrow),
            body: widening_dot::<Isa, 2, false>,
        },
        Descriptor {
            name: "simd_x3",
            description: "SMLAL, 3x unrolling",
            shape: widening(3, Narrow),
            body: widening_dot::<Isa, 3, false>,
        },
        Descriptor {
            name: "simd_x4",
            description: "SMLAL, 4x unrolling",
            shape: widening(4, Narrow),
            body: widening_dot::<Isa, 4, false>,
        },
        Descriptor {
            name: "simd_x6",
            description: "SMLAL, 6x unrolling",
            shape: widening(6, Narrow),
            body: widening_dot::<Isa, 6, false>,
        },
        Descriptor {
            name: "simd_split_x2",
            description: "SMLAL+SMLAL2 on one 128-bit load, 2-wide",
            shape: widening(2, Split),
            body: widening_dot::<Isa, 2, true>,
        },
        Descriptor {
            name: "simd_split_x4",
            description: "SMLAL+SMLAL2 on two 128-bit loads, 4-wide",
            shape: widening(4, Split),
            body: widening_dot::<Isa, 4, true>,
        },
    ]);

    table
}

/// All variants of one generation, bound to `capability`, in report order.
pub fn available_variants(capability: SimdCapability, generation: Generation) -> Vec<Kernel> {
    descriptors()
        .into_iter()
        .map(|d| Kernel {
            info: VariantInfo {
                name: d.name,
                description: d.description,
                function: d.body,
            },
            shape: d.shape,
            policy: generation.policy(),
            capability,
        })
        .collect()
}
