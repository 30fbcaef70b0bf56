//! Benchmark harness for the dot product kernels.
//!
//! Builds the two ramp inputs once, then measures each variant over the
//! requested number of trials in either inner-loop or outer-loop mode.

use std::hint::black_box;

use tracing::info;

use super::code::{available_variants, Generation, Kernel};
use crate::error::Result;
use crate::utils::cpu_features::SimdCapability;
use crate::utils::timer::{measure_variants, LoopMode, TimingConfig, TrialMeasurement, Variant};

/// Input length of the reference scenario.
pub const DEFAULT_LENGTH: u16 = 1027;
/// Trial count of the reference scenario.
pub const DEFAULT_TRIALS: u32 = 1_000_000;
/// First value of the second ramp.
pub const SECOND_RAMP_START: i16 = 100;

/// `(start, start + 1, ..., start + len - 1)`, wrapping at the `i16` range.
pub fn generate_ramp(start: i16, len: u16) -> Vec<i16> {
    (0..len).map(|i| start.wrapping_add(i as i16)).collect()
}

impl LoopMode {
    /// Kernel generation paired with this mode: single-shot kernels are called
    /// once per trial, trial-loop kernels run the loop themselves.
    pub const fn generation(self) -> Generation {
        match self {
            LoopMode::Inner => Generation::TrialLoop,
            LoopMode::Outer => Generation::SingleShot,
        }
    }
}

/// Everything one benchmark run produced, in variant order.
#[derive(Clone, Debug)]
pub struct Report {
    pub length: u16,
    pub trials: u32,
    pub mode: LoopMode,
    /// Instruction set the SIMD kernels ran on ("none" when unavailable)
    pub isa: &'static str,
    pub measurements: Vec<TrialMeasurement>,
}

impl Report {
    pub fn find(&self, name: &str) -> Option<&TrialMeasurement> {
        self.measurements.iter().find(|m| m.name == name)
    }
}

/// Run the reference sweep: detected capability, default timing config.
pub fn run(length: u16, trials: u32) -> Report {
    let config = TimingConfig::default();
    let kernels = available_variants(SimdCapability::detect(), config.mode.generation());
    run_with(&kernels, length, trials, &config)
}

/// Measure `kernels` on ramps of `length` elements, `trials` times each.
pub fn run_with(kernels: &[Kernel], length: u16, trials: u32, config: &TimingConfig) -> Report {
    let a = generate_ramp(0, length);
    let b = generate_ramp(SECOND_RAMP_START, length);

    let isa = kernels
        .iter()
        .find(|k| k.requires_simd())
        .map_or("none", |k| k.capability().isa());
    info!(length, trials, mode = ?config.mode, isa, variants = kernels.len(), "starting benchmark");

    let variants = kernels
        .iter()
        .map(|kernel| trial_variant(kernel, &a, &b, length, trials, config.mode))
        .collect();

    Report {
        length,
        trials,
        mode: config.mode,
        isa,
        measurements: measure_variants(variants, config),
    }
}

fn trial_variant<'a>(
    kernel: &'a Kernel,
    a: &'a [i16],
    b: &'a [i16],
    length: u16,
    trials: u32,
    mode: LoopMode,
) -> Variant<'a> {
    let run: Box<dyn FnMut() -> Result<i32> + 'a> = match mode {
        LoopMode::Inner => Box::new(move || kernel.compute_trials(a, b, length, trials)),
        LoopMode::Outer => Box::new(move || {
            if trials == 0 {
                // Still validate and apply the unsupported-hardware policy.
                return kernel.compute_trials(a, b, length, 0);
            }
            let mut last = 0;
            for _ in 0..trials {
                last = black_box(kernel.compute(black_box(a), black_box(b), length)?);
            }
            Ok(last)
        }),
    };

    Variant {
        name: kernel.name(),
        description: kernel.description(),
        run,
    }
}
