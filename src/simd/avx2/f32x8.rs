//! AVX2 8-lane f32 register wrapper.
//!
//! `F32x8` wraps the 256-bit `__m256` register together with the count of
//! valid lanes, so that full lane groups and partial tails flow through the
//! same load/compute/store shape. Partial loads and stores use AVX2 masked
//! moves, which never touch memory beyond the valid range and zero the
//! unselected lanes on load.
//!
//! Compiled only when the build script detected AVX2 on the build machine,
//! in which case the whole crate is built with the feature enabled.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::SimdVec;

/// Number of f32 elements in one 256-bit AVX2 register.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 vector of 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// Number of valid lanes (1-8).
    pub size: usize,
    /// 256-bit register holding the packed values.
    pub elements: __m256,
}

impl F32x8 {
    /// Checks 32-byte alignment, the requirement for `_mm256_load_ps`.
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        let ptr = ptr as usize;

        ptr % core::mem::align_of::<__m256>() == 0
    }

    /// Lane mask selecting the low `size` lanes.
    #[inline(always)]
    unsafe fn mask(size: usize) -> __m256i {
        match size {
            1 => _mm256_setr_epi32(-1, 0, 0, 0, 0, 0, 0, 0),
            2 => _mm256_setr_epi32(-1, -1, 0, 0, 0, 0, 0, 0),
            3 => _mm256_setr_epi32(-1, -1, -1, 0, 0, 0, 0, 0),
            4 => _mm256_setr_epi32(-1, -1, -1, -1, 0, 0, 0, 0),
            5 => _mm256_setr_epi32(-1, -1, -1, -1, -1, 0, 0, 0),
            6 => _mm256_setr_epi32(-1, -1, -1, -1, -1, -1, 0, 0),
            7 => _mm256_setr_epi32(-1, -1, -1, -1, -1, -1, -1, 0),
            _ => unreachable!("Size must be < {LANE_COUNT}"),
        }
    }
}

impl SimdVec<f32> for F32x8 {
    const LANES: usize = LANE_COUNT;

    /// Loads exactly 8 elements, picking the aligned move when the pointer
    /// sits on a 32-byte boundary.
    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let elements = match Self::is_aligned(ptr) {
            true => _mm256_load_ps(ptr),
            false => _mm256_loadu_ps(ptr),
        };

        Self {
            elements,
            size: LANE_COUNT,
        }
    }

    /// Loads `size < 8` elements with a masked move; unselected lanes are
    /// zero.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_maskload_ps(ptr, Self::mask(size)),
            size,
        }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: _mm256_set1_ps(value),
            size: LANE_COUNT,
        }
    }

    /// Stores the valid lanes, dispatching on size and alignment.
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(self.size <= LANE_COUNT, "Size must be <= {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match self.size.cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => self.store_at_partial(ptr),
            std::cmp::Ordering::Equal => match Self::is_aligned(ptr) {
                true => _mm256_store_ps(ptr, self.elements),
                false => _mm256_storeu_ps(ptr, self.elements),
            },
            std::cmp::Ordering::Greater => unreachable!("Size cannot exceed LANE_COUNT"),
        }
    }

    /// Masked store of the valid lanes only; memory past them is untouched.
    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32) {
        debug_assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_maskstore_ps(ptr, Self::mask(self.size), self.elements);
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { _mm256_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { _mm256_div_ps(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Extracts all 8 lanes regardless of the valid-lane count.
    fn extract_elements(vec: &F32x8) -> [f32; 8] {
        let mut result = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(result.as_mut_ptr(), vec.elements) };
        result
    }

    #[test]
    fn test_load_store_roundtrip_full() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let vec = unsafe { F32x8::load(data.as_ptr(), LANE_COUNT) };
        assert_eq!(vec.size, 8);

        let mut out = [0.0f32; 8];
        unsafe { vec.store_at(out.as_mut_ptr()) };
        assert_eq!(out, data);
    }

    #[test]
    fn test_load_partial_zeroes_dead_lanes() {
        let data = [1.0, 2.0, 3.0];
        let vec = unsafe { F32x8::load_partial(data.as_ptr(), 3) };

        assert_eq!(vec.size, 3);
        let lanes = extract_elements(&vec);
        assert_eq!(&lanes[..3], &data);
        assert_eq!(&lanes[3..], &[0.0; 5]);
    }

    #[test]
    fn test_store_partial_leaves_tail_untouched() {
        for size in 1..LANE_COUNT {
            let data: Vec<f32> = (0..size).map(|i| (i + 1) as f32).collect();
            let vec = unsafe { F32x8::load_partial(data.as_ptr(), size) };

            let mut buffer = [-1.0f32; 8];
            unsafe { vec.store_at(buffer.as_mut_ptr()) };

            for (i, e) in buffer.iter().enumerate() {
                if i < size {
                    assert_eq!(*e, (i + 1) as f32, "mismatch at {i} for size {size}");
                } else {
                    assert_eq!(*e, -1.0, "lane {i} clobbered for size {size}");
                }
            }
        }
    }

    #[test]
    fn test_splat_fills_all_lanes() {
        let vec = unsafe { F32x8::splat(2.5) };
        assert_eq!(extract_elements(&vec), [2.5; 8]);
    }

    #[test]
    fn test_arithmetic_operators() {
        let a = unsafe { F32x8::load([1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0].as_ptr(), 8) };
        let b = unsafe { F32x8::splat(2.0) };

        assert_eq!(
            extract_elements(&(a + b)),
            [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        assert_eq!(
            extract_elements(&(a - b)),
            [-1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
        assert_eq!(
            extract_elements(&(a * b)),
            [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]
        );
        assert_eq!(
            extract_elements(&(a / b)),
            [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]
        );
    }
}
