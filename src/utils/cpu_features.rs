//! Runtime SIMD capability, resolved once and handed to every kernel.
//!
//! Kernels never probe the CPU themselves. A [`SimdCapability`] is built at
//! the start of a run (usually with [`SimdCapability::detect`]) and copied into
//! each kernel when the variant table is built.

use tracing::debug;

/// Whether the host can run the widening multiply-accumulate kernels.
///
/// The only ways to obtain one are runtime detection or an explicit opt-out,
/// so a kernel holding `available == true` can rely on the instructions existing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimdCapability {
    widening_mac: bool,
}

impl SimdCapability {
    /// Probe the current CPU.
    ///
    /// On aarch64: NEON (SMLAL/SMLAL2/ADDV).
    /// On x86_64: SSE2 (PMULLW/PMULHW + unpack + PADDD).
    pub fn detect() -> Self {
        let widening_mac = probe();
        debug!(isa = isa_name(), widening_mac, "resolved SIMD capability");
        Self { widening_mac }
    }

    /// A capability that reports no SIMD support, whatever the hardware.
    pub const fn unavailable() -> Self {
        Self {
            widening_mac: false,
        }
    }

    /// True when the widening multiply-accumulate kernels may run.
    pub fn has_widening_mac(&self) -> bool {
        self.widening_mac
    }

    /// Name of the instruction set the SIMD kernels use, or "none".
    pub fn isa(&self) -> &'static str {
        if self.widening_mac {
            isa_name()
        } else {
            "none"
        }
    }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}

#[cfg(target_arch = "x86_64")]
fn probe() -> bool {
    std::is_x86_feature_detected!("sse2")
}

#[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
fn probe() -> bool {
    false
}

const fn isa_name() -> &'static str {
    #[cfg(target_arch = "aarch64")]
    {
        "neon"
    }
    #[cfg(target_arch = "x86_64")]
    {
        "sse2"
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
    {
        "none"
    }
}
