//! Wall-clock timing for whole trial runs.
//!
//! Each variant is measured exactly once per benchmark: a single closure call
//! covers every trial (the closure decides whether the trial loop lives in the
//! kernel or around it). An optional warm-up call runs first and is timed on
//! its own.

use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::cpu_affinity::CpuPinGuard;
use crate::error::DotProductError;

// ============================================================================
// Configuration
// ============================================================================

/// Where the trial loop lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// The kernel repeats the computation itself; one call per run.
    #[default]
    Inner,
    /// The harness calls the kernel once per trial.
    Outer,
}

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements
    Global,
    /// Pin/unpin around each variant
    #[default]
    PerVariant,
    /// Leave scheduling to the OS
    Off,
}

/// Configuration for a benchmark sweep
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Trial loop placement (default: Inner)
    pub mode: LoopMode,
    /// Run every variant once before the timed run (default: true).
    ///
    /// The warm-up repeats the full trial count, so it roughly doubles the
    /// wall-clock time of a sweep.
    pub warmup: bool,
    /// CPU pinning strategy (default: PerVariant)
    pub pin_strategy: PinStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mode: LoopMode::default(),
            warmup: true,
            pin_strategy: PinStrategy::default(),
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Runs every trial and returns the last result.
    pub run: Box<dyn FnMut() -> Result<i32, DotProductError> + 'a>,
}

/// Outcome of one variant in one benchmark run.
#[derive(Clone, Debug)]
pub struct TrialMeasurement {
    /// Name of the variant
    pub name: &'static str,
    /// Description of the variant
    pub description: &'static str,
    /// Last computed result, or why there is none
    pub outcome: Result<i32, DotProductError>,
    /// Wall-clock time of the timed run, all trials included
    pub elapsed: Duration,
    /// Wall-clock time of the warm-up run, when one was made
    pub warmup_elapsed: Option<Duration>,
}

impl TrialMeasurement {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn result(&self) -> Option<i32> {
        self.outcome.as_ref().ok().copied()
    }
}

/// Measure variants sequentially, in the given order.
///
/// A variant whose warm-up fails is not run again; its error becomes the
/// outcome and the sweep moves on.
pub fn measure_variants(variants: Vec<Variant>, config: &TimingConfig) -> Vec<TrialMeasurement> {
    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    variants
        .into_iter()
        .map(|mut variant| {
            let _per_variant_pin =
                (config.pin_strategy == PinStrategy::PerVariant).then(CpuPinGuard::new);
            debug!(variant = variant.name, warmup = config.warmup, "measuring");

            let mut warmup_elapsed = None;
            if config.warmup {
                let start = Instant::now();
                let warm = black_box((variant.run)());
                warmup_elapsed = Some(start.elapsed());
                if let Err(e) = warm {
                    warn!(variant = variant.name, error = %e, "variant produced no result");
                    return TrialMeasurement {
                        name: variant.name,
                        description: variant.description,
                        outcome: Err(e),
                        elapsed: Duration::ZERO,
                        warmup_elapsed,
                    };
                }
            }

            let start = Instant::now();
            let outcome = black_box((variant.run)());
            let elapsed = start.elapsed();

            match &outcome {
                Ok(result) => debug!(variant = variant.name, result, ?elapsed, "done"),
                Err(e) => warn!(variant = variant.name, error = %e, "variant produced no result"),
            }

            TrialMeasurement {
                name: variant.name,
                description: variant.description,
                outcome,
                elapsed,
                warmup_elapsed,
            }
        })
        .collect()
}
