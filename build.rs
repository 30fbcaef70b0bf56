//! Build script to compile the native C comparison kernel.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");

    let compiler = match cc::Build::new().try_get_compiler() {
        Ok(compiler) => compiler,
        Err(e) => {
            println!("cargo:warning=No usable C compiler ({}). C kernel disabled.", e);
            return;
        }
    };

    let compiler_name = if compiler.is_like_clang() {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if target_os == "macos" {
            "Apple Clang"
        } else {
            "Clang"
        }
    } else if compiler.is_like_gnu() {
        "GCC"
    } else if compiler.is_like_msvc() {
        "MSVC"
    } else {
        println!("cargo:warning=C compiler is not compatible (needs GCC, Clang, or MSVC). C kernel disabled.");
        return;
    };

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded_rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    let is_rust_native =
        rustflags.contains("target-cpu=native") || encoded_rustflags.contains("target-cpu=native");

    let mut build = cc::Build::new();

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect::<Vec<_>>(),
        Err(e) => {
            println!("cargo:warning=Bad glob pattern ({}). C kernel disabled.", e);
            return;
        }
    };
    if c_files.is_empty() {
        return;
    }

    for file in &c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    build.opt_level(3);

    // Integer kernels only: keep the C baseline on the same ISA level as rustc.
    if is_rust_native {
        build.flag_if_supported("-march=native");
    }

    if let Err(e) = build.try_compile("dot_product_c") {
        println!("cargo:warning=C kernel failed to compile ({}). C kernel disabled.", e);
        return;
    }

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
