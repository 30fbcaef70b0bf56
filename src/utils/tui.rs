//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use terminal_size::{terminal_size, Width};

use crate::math::dot_product::{Kernel, Report};
use crate::utils::timer::{LoopMode, TrialMeasurement};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

fn display_name(name: &str) -> String {
    if name.starts_with("c-") {
        match crate::utils::C_COMPILER_NAME {
            Some(c) => format!("{} ({})", name, c),
            None => name.to_string(),
        }
    } else {
        name.to_string()
    }
}

fn format_elapsed(m: &TrialMeasurement) -> String {
    match m.warmup_elapsed {
        Some(first) if m.outcome.is_ok() => {
            format!("{} ms, then {} ms", first.as_millis(), m.elapsed_ms())
        }
        _ => format!("{} ms", m.elapsed_ms()),
    }
}

/// Render the report as a table.
pub fn render_report(report: &Report, width: usize) -> String {
    let fixed_width = 12 + 24 + 9 + 3;
    let variant_col_width = width.saturating_sub(fixed_width + 2).max(15);
    let table_width = variant_col_width + fixed_width;

    let baseline_ms = report
        .measurements
        .first()
        .map(|m| m.elapsed.as_secs_f64() * 1e3)
        .unwrap_or(0.0);

    let mode = match report.mode {
        LoopMode::Inner => "inner loop",
        LoopMode::Outer => "outer loop",
    };

    let mut out = String::new();
    out.push_str(&format!(
        "  Length: {}  Trials: {}  Mode: {}  SIMD: {}\n",
        report.length, report.trials, mode, report.isa
    ));
    out.push_str(&format!("  {}\n", "─".repeat(table_width)));
    out.push_str(&format!(
        "  {:<v$} {:>12} {:>24} {:>9}\n",
        "Variant",
        "Result",
        "Elapsed",
        "Speedup",
        v = variant_col_width
    ));
    out.push_str(&format!("  {}\n", "─".repeat(table_width)));

    for m in &report.measurements {
        let result = match &m.outcome {
            Ok(value) => value.to_string(),
            Err(_) => "n/a".to_string(),
        };
        let ms = m.elapsed.as_secs_f64() * 1e3;
        let speedup = if m.outcome.is_ok() && ms > 0.0 {
            format!("{:>8.2}x", baseline_ms / ms)
        } else {
            format!("{:>9}", "-")
        };

        out.push_str(&format!(
            "  {:<v$} {:>12} {:>24} {}\n",
            truncate(&display_name(m.name), variant_col_width),
            result,
            format_elapsed(m),
            speedup,
            v = variant_col_width
        ));
        if let Err(e) = &m.outcome {
            out.push_str(&format!("    {}\n", e));
        }
    }
    out
}

/// Print the report sized to the terminal.
pub fn print_report(report: &Report) {
    println!("{}", render_report(report, get_term_width()));
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " i16 Dot Product Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the help message
pub fn print_help() {
    println!("Usage: dot-bench [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --length N        Input vector length, 0..=65535 (default: 1027)");
    println!("  --trials N        Trials per variant (default: 1000000)");
    println!("  --mode MODE       inner: trial loop inside the kernel (default)");
    println!("                    outer: one kernel call per trial");
    println!("  --no-warmup       Skip the warm-up run (it repeats every trial,");
    println!("                    roughly doubling the sweep time)");
    println!("  --no-simd         Pretend the CPU has no SIMD support");
    println!("  --pin STRATEGY    global, per-variant (default) or off");
    println!("  --verify          Check every variant against the scalar reference");
    println!("  --list, -l        List variants");
    println!("  --help, -h        Show this help message");
    println!();
    println!("Logging goes to stderr and is controlled by RUST_LOG (e.g. RUST_LOG=debug).");
}

/// Print the list of available variants
pub fn print_available_variants(kernels: &[Kernel]) {
    println!("Available variants:");
    println!();
    for kernel in kernels {
        println!(
            "  {:<16} [{}] - {}",
            display_name(kernel.name()),
            kernel.shape(),
            kernel.description()
        );
    }
}
