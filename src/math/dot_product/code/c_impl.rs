//! FFI binding for the C scalar kernel.

#[cfg(c_implementation_active)]
mod ffi {
    use libc::size_t;

    extern "C" {
        pub fn dot_product_c_original(a: *const i16, b: *const i16, len: size_t) -> i32;
    }
}

/// C original implementation wrapper
#[cfg(c_implementation_active)]
pub fn dot_product_c_original(a: &[i16], b: &[i16]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    // SAFETY: both pointers are valid for `a.len()` reads.
    unsafe { ffi::dot_product_c_original(a.as_ptr(), b.as_ptr(), a.len()) }
}

/// Check if the C implementation is available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

// Keeps the variant table compiling; never listed when the C build is off.
#[cfg(not(c_implementation_active))]
pub(crate) fn dot_product_c_original(_a: &[i16], _b: &[i16]) -> i32 {
    panic!("C implementation not compiled (requires a C compiler)")
}
