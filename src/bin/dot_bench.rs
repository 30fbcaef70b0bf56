//! CLI for the i16 dot product benchmark.
//!
//! Usage:
//!   dot-bench                          # Reference run: 1027 elements, 1e6 trials
//!   dot-bench --length 4096 --trials 1000
//!   dot-bench --mode outer             # One kernel call per trial
//!   dot-bench --verify                 # Correctness check only
//!   dot-bench --help                   # Show help

use std::env;
use std::process::ExitCode;

use i16_dot_bench::math::dot_product::{self, available_variants};
use i16_dot_bench::utils::timer::{LoopMode, PinStrategy, TimingConfig};
use i16_dot_bench::utils::SimdCapability;
use i16_dot_bench::tui;
use tracing_subscriber::EnvFilter;

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {}: '{}'", flag, value))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut show_list = false;
    let mut show_help = false;
    let mut verify_only = false;
    let mut no_simd = false;
    let mut length = dot_product::bench::DEFAULT_LENGTH;
    let mut trials = dot_product::bench::DEFAULT_TRIALS;
    let mut config = TimingConfig::default();

    let mut i = 1;
    while i < args.len() {
        let parsed = match args[i].as_str() {
            "--list" | "-l" => {
                show_list = true;
                Ok(())
            }
            "--help" | "-h" => {
                show_help = true;
                Ok(())
            }
            "--verify" => {
                verify_only = true;
                Ok(())
            }
            "--no-warmup" => {
                config.warmup = false;
                Ok(())
            }
            "--no-simd" => {
                no_simd = true;
                Ok(())
            }
            "--length" => {
                i += 1;
                parse_value("--length", args.get(i)).map(|v| length = v)
            }
            "--trials" => {
                i += 1;
                parse_value("--trials", args.get(i)).map(|v| trials = v)
            }
            "--mode" => {
                i += 1;
                match args.get(i).map(String::as_str) {
                    Some("inner") => {
                        config.mode = LoopMode::Inner;
                        Ok(())
                    }
                    Some("outer") => {
                        config.mode = LoopMode::Outer;
                        Ok(())
                    }
                    other => Err(format!("--mode expects inner or outer, got {:?}", other)),
                }
            }
            "--pin" => {
                i += 1;
                match args.get(i).map(String::as_str) {
                    Some("global") => {
                        config.pin_strategy = PinStrategy::Global;
                        Ok(())
                    }
                    Some("per-variant") => {
                        config.pin_strategy = PinStrategy::PerVariant;
                        Ok(())
                    }
                    Some("off") => {
                        config.pin_strategy = PinStrategy::Off;
                        Ok(())
                    }
                    other => Err(format!(
                        "--pin expects global, per-variant or off, got {:?}",
                        other
                    )),
                }
            }
            other => Err(format!("Unknown option: {}", other)),
        };

        if let Err(msg) = parsed {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
        i += 1;
    }

    if show_help {
        tui::print_help();
        return ExitCode::SUCCESS;
    }

    let capability = if no_simd {
        SimdCapability::unavailable()
    } else {
        SimdCapability::detect()
    };
    let kernels = available_variants(capability, config.mode.generation());

    if show_list {
        tui::print_available_variants(&kernels);
        return ExitCode::SUCCESS;
    }

    if verify_only {
        return match dot_product::verify(capability) {
            Ok(()) => {
                println!("All variants match the scalar reference (SIMD: {}).", capability.isa());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    tui::print_header();
    let report = dot_product::run_with(&kernels, length, trials, &config);
    tui::print_report(&report);

    println!("Note: Speedup is relative to the first variant ('original').");
    ExitCode::SUCCESS
}
