//! Correctness tests for the dot product kernels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::code::emulated::Emulated;
use super::code::*;
use crate::error::DotProductError;
use crate::math::dot_product::generate_ramp;
use crate::utils::cpu_features::SimdCapability;

const WIDTHS: [usize; 5] = [4, 8, 12, 16, 24];
const GOLDEN_1027: i32 = 413_226_801;

fn all_kernels() -> Vec<Kernel> {
    let caps = SimdCapability::detect();
    let mut kernels = available_variants(caps, Generation::SingleShot);
    kernels.extend(available_variants(caps, Generation::TrialLoop));
    kernels
}

fn random_pair(rng: &mut StdRng, len: usize) -> (Vec<i16>, Vec<i16>) {
    let a = (0..len).map(|_| rng.random()).collect();
    let b = (0..len).map(|_| rng.random()).collect();
    (a, b)
}

/// Independent oracle: exact i64 sum truncated to 32 bits.
fn wrapped_i64(a: &[i16], b: &[i16]) -> i32 {
    let exact: i64 = a.iter().zip(b).map(|(&x, &y)| i64::from(x) * i64::from(y)).sum();
    exact as i32
}

fn assert_all_match(a: &[i16], b: &[i16]) {
    let expected = dot_product_original(a, b);
    let length = a.len() as u16;
    for kernel in all_kernels() {
        assert_eq!(
            kernel.compute(a, b, length),
            Ok(expected),
            "variant {} at length {}",
            kernel.name(),
            a.len()
        );
    }
}

#[test]
fn test_original_basic() {
    let a = [1, 2, 3, 4];
    let b = [5, 6, 7, 8];
    // 1*5 + 2*6 + 3*7 + 4*8 = 5 + 12 + 21 + 32 = 70
    assert_eq!(dot_product_original(&a, &b), 70);
}

#[test]
fn test_original_empty() {
    assert_eq!(dot_product_original(&[], &[]), 0);
}

#[test]
fn test_original_single() {
    assert_eq!(dot_product_original(&[-3], &[4]), -12);
}

#[test]
fn test_ramp_golden_value() {
    let a = generate_ramp(0, 1027);
    let b = generate_ramp(100, 1027);
    assert_eq!(dot_product_original(&a, &b), GOLDEN_1027);
    for kernel in all_kernels() {
        assert_eq!(kernel.compute(&a, &b, 1027), Ok(GOLDEN_1027), "variant {}", kernel.name());
    }
}

#[test]
fn test_empty_and_single_element() {
    assert_all_match(&[], &[]);
    assert_all_match(&[i16::MIN], &[i16::MIN]);
    assert_all_match(&[7], &[-9]);
}

#[test]
fn test_lengths_around_every_width() {
    let mut rng = StdRng::seed_from_u64(42);
    for width in WIDTHS {
        for k in 1..=4 {
            for len in [k * width - 1, k * width, k * width + 1] {
                let (a, b) = random_pair(&mut rng, len);
                assert_all_match(&a, &b);
            }
        }
    }
}

#[test]
fn test_every_length_up_to_100() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in 0..=100 {
        let (a, b) = random_pair(&mut rng, len);
        assert_all_match(&a, &b);
    }
}

#[test]
fn test_tail_elements_are_consumed_in_order() {
    // Only the trailing elements are non-zero, so the main loop contributes
    // nothing and the result is exactly the tail.
    for width in WIDTHS {
        for tail in 1..width {
            let len = 2 * width + tail;
            let mut a = vec![0i16; len];
            let b: Vec<i16> = (0..len).map(|i| i as i16 + 1).collect();
            for (offset, x) in a[2 * width..].iter_mut().enumerate() {
                *x = 10i16.pow(offset as u32 % 4);
            }
            let expected = wrapped_i64(&a, &b);
            assert_eq!(dot_product_original(&a, &b), expected);
            assert_all_match(&a, &b);
        }
    }
}

#[test]
fn test_overflow_wraps_identically() {
    for len in 0..=64 {
        let a = vec![i16::MIN; len];
        let b = vec![i16::MIN; len];
        // Each term is 2^30; four of them wrap to zero.
        assert_eq!(dot_product_original(&a, &b), wrapped_i64(&a, &b));
        assert_all_match(&a, &b);

        let c = vec![i16::MAX; len];
        assert_eq!(dot_product_original(&a, &c), wrapped_i64(&a, &c));
        assert_all_match(&a, &c);
    }
}

#[test]
fn test_overflow_random_extremes() {
    let mut rng = StdRng::seed_from_u64(0xBAD);
    for len in [1027, 4000, 65_535] {
        let a: Vec<i16> = (0..len)
            .map(|_| if rng.random_bool(0.5) { i16::MIN } else { i16::MAX })
            .collect();
        let b: Vec<i16> = (0..len)
            .map(|_| if rng.random_bool(0.5) { i16::MIN } else { i16::MAX })
            .collect();
        assert_eq!(dot_product_original(&a, &b), wrapped_i64(&a, &b));
        assert_all_match(&a, &b);
    }
}

#[test]
fn test_split_loads_match_narrow_loads() {
    let kernels = available_variants(SimdCapability::detect(), Generation::TrialLoop);
    let find = |name: &str| *kernels.iter().find(|k| k.name() == name).unwrap();
    let pairs = [
        (find("simd_x2"), find("simd_split_x2")),
        (find("simd_x4"), find("simd_split_x4")),
    ];

    let mut rng = StdRng::seed_from_u64(99);
    for len in [0, 7, 8, 9, 15, 16, 17, 255, 1027] {
        let (a, b) = random_pair(&mut rng, len);
        for (narrow, split) in &pairs {
            assert_eq!(narrow.shape().width(), split.shape().width());
            assert_eq!(
                narrow.compute(&a, &b, len as u16),
                split.compute(&a, &b, len as u16),
                "{} vs {} at length {}",
                narrow.name(),
                split.name(),
                len
            );
        }
    }
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    let (a, b) = random_pair(&mut rng, 333);
    for kernel in all_kernels() {
        let first = kernel.compute(&a, &b, 333);
        for _ in 0..3 {
            assert_eq!(kernel.compute(&a, &b, 333), first, "variant {}", kernel.name());
        }
        assert_eq!(kernel.compute_trials(&a, &b, 333, 5), first);
    }
}

#[test]
fn test_zero_trials_returns_zero() {
    let a = generate_ramp(0, 10);
    for kernel in all_kernels() {
        assert_eq!(kernel.compute_trials(&a, &a, 10, 0), Ok(0));
    }
}

#[test]
fn test_variant_table() {
    let kernels = available_variants(SimdCapability::detect(), Generation::TrialLoop);
    let shape_of = |name: &str| kernels.iter().find(|k| k.name() == name).map(|k| k.shape());

    assert_eq!(kernels[0].name(), "original");
    assert_eq!(shape_of("original"), Some(Shape::Scalar));
    assert_eq!(shape_of("scalar_opt"), Some(Shape::Scalar));

    let expected = [
        ("simd_x1", 4, 1, LoadStrategy::Narrow),
        ("simd_x2", 8, 2, LoadStrategy::Narrow),
        ("simd_x3", 12, 3, LoadStrategy::Narrow),
        ("simd_x4", 16, 4, LoadStrategy::Narrow),
        ("simd_x6", 24, 6, LoadStrategy::Narrow),
        ("simd_split_x2", 8, 2, LoadStrategy::Split),
        ("simd_split_x4", 16, 4, LoadStrategy::Split),
    ];
    for (name, width, accumulators, loads) in expected {
        let shape = shape_of(name).unwrap_or_else(|| panic!("missing variant {}", name));
        assert_eq!(shape, Shape::Widening { accumulators, loads });
        assert_eq!(shape.width(), width);
        assert!(shape.requires_simd());
    }

    let mut names: Vec<_> = kernels.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), kernels.len(), "variant names must be unique");
}

#[test]
fn test_generation_policies() {
    assert_eq!(Generation::SingleShot.policy(), UnsupportedPolicy::Fail);
    assert_eq!(Generation::TrialLoop.policy(), UnsupportedPolicy::Sentinel);

    let caps = SimdCapability::unavailable();
    for kernel in available_variants(caps, Generation::SingleShot) {
        assert_eq!(kernel.policy(), UnsupportedPolicy::Fail);
    }
    for kernel in available_variants(caps, Generation::TrialLoop) {
        assert_eq!(kernel.policy(), UnsupportedPolicy::Sentinel);
    }
}

#[test]
fn test_single_shot_fails_without_simd() {
    let a = generate_ramp(0, 1027);
    let b = generate_ramp(100, 1027);
    for kernel in available_variants(SimdCapability::unavailable(), Generation::SingleShot) {
        let result = kernel.compute(&a, &b, 1027);
        if kernel.requires_simd() {
            assert_eq!(
                result,
                Err(DotProductError::UnsupportedHardware {
                    kernel: kernel.name()
                })
            );
            // Length 0 follows the same policy.
            assert!(kernel.compute(&[], &[], 0).is_err());
        } else {
            assert_eq!(result, Ok(GOLDEN_1027), "variant {}", kernel.name());
        }
    }
}

#[test]
fn test_trial_loop_returns_sentinel_without_simd() {
    let a = generate_ramp(0, 1027);
    let b = generate_ramp(100, 1027);
    for kernel in available_variants(SimdCapability::unavailable(), Generation::TrialLoop) {
        let expected = if kernel.requires_simd() { SENTINEL } else { GOLDEN_1027 };
        assert_eq!(kernel.compute_trials(&a, &b, 1027, 4), Ok(expected), "variant {}", kernel.name());
        assert_eq!(kernel.compute(&[], &[], 0), Ok(0));
    }
}

#[test]
fn test_length_zero_with_simd() {
    for kernel in all_kernels() {
        assert_eq!(kernel.compute(&[], &[], 0), Ok(0), "variant {}", kernel.name());
    }
}

#[test]
fn test_invalid_arguments_are_rejected() {
    let a = [1i16, 2, 3, 4];
    let b = [1i16, 2, 3];
    for kernel in all_kernels() {
        assert!(matches!(
            kernel.compute(&a, &b, 3),
            Err(DotProductError::InvalidArgument(_))
        ));
        assert!(matches!(
            kernel.compute(&a, &a, 5),
            Err(DotProductError::InvalidArgument(_))
        ));
        assert!(matches!(
            kernel.compute_trials(&a, &a, 2, 10),
            Err(DotProductError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_invalid_arguments_checked_before_capability() {
    let a = [1i16, 2];
    for generation in [Generation::SingleShot, Generation::TrialLoop] {
        for kernel in available_variants(SimdCapability::unavailable(), generation) {
            assert!(matches!(
                kernel.compute(&a, &a[..1], 2),
                Err(DotProductError::InvalidArgument(_))
            ));
        }
    }
}

#[test]
fn test_scalar_opt_matches_original() {
    let mut rng = StdRng::seed_from_u64(11);
    for len in [0, 1, 7, 8, 9, 63, 64, 65, 1027] {
        let (a, b) = random_pair(&mut rng, len);
        assert_eq!(dot_product_scalar_opt(&a, &b), dot_product_original(&a, &b));
    }
}

#[test]
fn test_emulated_lanes_match_original() {
    // Exercises the accumulator layout on any host, SIMD or not.
    let mut rng = StdRng::seed_from_u64(5);
    for len in [0, 3, 4, 5, 23, 24, 25, 48, 1027] {
        let (a, b) = random_pair(&mut rng, len);
        let expected = dot_product_original(&a, &b);
        // SAFETY: equal lengths; Emulated uses no special instructions.
        let got = unsafe {
            [
                widening_dot::<Emulated, 1, false>(&a, &b),
                widening_dot::<Emulated, 2, false>(&a, &b),
                widening_dot::<Emulated, 3, false>(&a, &b),
                widening_dot::<Emulated, 4, false>(&a, &b),
                widening_dot::<Emulated, 6, false>(&a, &b),
                widening_dot::<Emulated, 2, true>(&a, &b),
                widening_dot::<Emulated, 4, true>(&a, &b),
            ]
        };
        assert!(got.iter().all(|&g| g == expected), "length {}: {:?} vs {}", len, got, expected);
    }
}

#[test]
fn test_c_kernel_matches_when_available() {
    if !C_IMPL_AVAILABLE {
        return;
    }
    let mut rng = StdRng::seed_from_u64(13);
    let (a, b) = random_pair(&mut rng, 999);
    assert_eq!(c_impl::dot_product_c_original(&a, &b), dot_product_original(&a, &b));
}

#[test]
fn test_shape_display() {
    assert_eq!(Shape::Scalar.to_string(), "scalar");
    assert_eq!(
        Shape::Widening {
            accumulators: 4,
            loads: LoadStrategy::Split
        }
        .to_string(),
        "W=16 acc=4 split"
    );
}
