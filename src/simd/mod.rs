//! Backend selection and lane-width constants.
//!
//! The build script probes the build machine's CPU and emits exactly one of
//! the cfg flags `avx2`, `neon`, `sse` or `fallback`; cross-compiled builds
//! always get `fallback`. The flag picks the compiled backend module and the
//! padding width used by array storage. The scalar fallback (`L = 1`) is a
//! full correctness path, not a stub: acceleration only changes throughput.

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod traits;

#[cfg(avx2)]
pub use avx2::{binop_f32, div_f32, scalar_div_f32, scalar_f32};
#[cfg(neon)]
pub use neon::{binop_f32, div_f32, scalar_div_f32, scalar_f32};

/// Width of one vector register in bytes for the compiled backend.
///
/// Under `sse` no kernels are shipped, but the 16-byte width still sets the
/// padding discipline so the scalar loops auto-vectorize over full lanes.
#[cfg(avx2)]
pub const VECTOR_WIDTH_BYTES: usize = 32;
#[cfg(any(sse, neon))]
pub const VECTOR_WIDTH_BYTES: usize = 16;
#[cfg(fallback)]
pub const VECTOR_WIDTH_BYTES: usize = 0;

/// Lane width `L` for an element type: how many elements one vector
/// instruction processes. `1` in the scalar fallback.
pub const fn lane_count<T>() -> usize {
    let size = std::mem::size_of::<T>();
    if VECTOR_WIDTH_BYTES < size {
        1
    } else {
        VECTOR_WIDTH_BYTES / size
    }
}

/// Byte alignment for array buffers of `T`: the backend's register width, or
/// the type's natural alignment when that is larger (scalar fallback).
pub const fn buffer_alignment<T>() -> usize {
    let align = std::mem::align_of::<T>();
    if VECTOR_WIDTH_BYTES > align {
        VECTOR_WIDTH_BYTES
    } else {
        align
    }
}
