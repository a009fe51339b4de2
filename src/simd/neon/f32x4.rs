//! NEON 4-lane f32 register wrapper.
//!
//! NEON has no masked loads, so partial groups are assembled lane by lane
//! into a zeroed register and written back the same way. Loads carry no
//! alignment distinction on aarch64.

use std::arch::aarch64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::SimdVec;

/// Number of f32 elements in one 128-bit NEON register.
pub(crate) const LANE_COUNT: usize = 4;

/// NEON vector of 4 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    /// Number of valid lanes (1-4).
    pub size: usize,
    /// 128-bit register holding the packed values.
    pub elements: float32x4_t,
}

impl SimdVec<f32> for F32x4 {
    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f32(ptr),
            size: LANE_COUNT,
        }
    }

    /// Assembles `size < 4` elements into a zeroed register; dead lanes stay
    /// zero.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let elements = match size {
            1 => {
                let v = vdupq_n_f32(0.0);
                vsetq_lane_f32(*ptr.add(0), v, 0)
            }
            2 => {
                let mut v = vdupq_n_f32(0.0);
                v = vsetq_lane_f32(*ptr.add(0), v, 0);
                vsetq_lane_f32(*ptr.add(1), v, 1)
            }
            3 => {
                let mut v = vdupq_n_f32(0.0);
                v = vsetq_lane_f32(*ptr.add(0), v, 0);
                v = vsetq_lane_f32(*ptr.add(1), v, 1);
                vsetq_lane_f32(*ptr.add(2), v, 2)
            }
            _ => unreachable!("Size must be < {LANE_COUNT}"),
        };

        Self { elements, size }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: vdupq_n_f32(value),
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(self.size <= LANE_COUNT, "Size must be <= {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        if self.size == LANE_COUNT {
            vst1q_f32(ptr, self.elements);
        } else {
            self.store_at_partial(ptr);
        }
    }

    /// Writes only the valid lanes; memory past them is untouched.
    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32) {
        debug_assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match self.size {
            1 => {
                *ptr = vgetq_lane_f32(self.elements, 0);
            }
            2 => {
                let low = vget_low_f32(self.elements);
                vst1_f32(ptr, low);
            }
            3 => {
                let low = vget_low_f32(self.elements);
                vst1_f32(ptr, low);
                *ptr.add(2) = vgetq_lane_f32(self.elements, 2);
            }
            _ => unreachable!("Size must be < {LANE_COUNT}"),
        }
    }
}

impl Add for F32x4 {
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
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x4 {
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
            elements: unsafe { vsubq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
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
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x4 {
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
            elements: unsafe { vdivq_f32(self.elements, rhs.elements) },
        }
    }
}
