//! NEON slice kernels for the f32 element type.
//!
//! Same shape as the AVX2 kernels: full 4-lane groups followed by one
//! partial group assembled lane by lane. Float division by zero follows
//! IEEE-754 and never traps, so zero-filled dead lanes in a partial divisor
//! group are harmless and never reach memory.

use crate::element::{BinOp, ScalarDivOp, ScalarOp};
use crate::simd::traits::SimdVec;

use super::f32x4::{F32x4, LANE_COUNT};

#[inline(always)]
fn apply_binop(op: BinOp, a: F32x4, b: F32x4) -> F32x4 {
    match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
    }
}

#[inline(always)]
fn apply_scalar(kind: ScalarOp, v: F32x4, k: F32x4) -> F32x4 {
    match kind {
        ScalarOp::Add => v + k,
        ScalarOp::Mul => v * k,
        ScalarOp::SubScalarFromVec => v - k,
        ScalarOp::SubVecFromScalar => k - v,
    }
}

/// Elementwise `out[i] = a[i] op b[i]` over equal-length slices.
pub fn binop_f32(op: BinOp, a: &[f32], b: &[f32], out: &mut [f32]) {
    debug_assert!(a.len() == b.len() && a.len() == out.len());

    let size = out.len();
    let main = size - (size % LANE_COUNT);

    for i in (0..main).step_by(LANE_COUNT) {
        unsafe {
            let va = F32x4::load(a.as_ptr().add(i), LANE_COUNT);
            let vb = F32x4::load(b.as_ptr().add(i), LANE_COUNT);
            apply_binop(op, va, vb).store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        unsafe {
            let va = F32x4::load_partial(a.as_ptr().add(main), size - main);
            let vb = F32x4::load_partial(b.as_ptr().add(main), size - main);
            apply_binop(op, va, vb).store_at(out.as_mut_ptr().add(main));
        }
    }
}

/// Elementwise `out[i] = a[i] / b[i]`, IEEE-754 semantics.
pub fn div_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    debug_assert!(a.len() == b.len() && a.len() == out.len());

    let size = out.len();
    let main = size - (size % LANE_COUNT);

    for i in (0..main).step_by(LANE_COUNT) {
        unsafe {
            let va = F32x4::load(a.as_ptr().add(i), LANE_COUNT);
            let vb = F32x4::load(b.as_ptr().add(i), LANE_COUNT);
            (va / vb).store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        unsafe {
            let va = F32x4::load_partial(a.as_ptr().add(main), size - main);
            let vb = F32x4::load_partial(b.as_ptr().add(main), size - main);
            (va / vb).store_at(out.as_mut_ptr().add(main));
        }
    }
}

/// Broadcast `out[i] = v[i] op k` (or `k op v[i]`).
pub fn scalar_f32(kind: ScalarOp, v: &[f32], k: f32, out: &mut [f32]) {
    debug_assert!(v.len() == out.len());

    let size = out.len();
    let main = size - (size % LANE_COUNT);
    let vk = unsafe { F32x4::splat(k) };

    for i in (0..main).step_by(LANE_COUNT) {
        unsafe {
            let vv = F32x4::load(v.as_ptr().add(i), LANE_COUNT);
            apply_scalar(kind, vv, vk).store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        let rem = size - main;
        // shrink the splat to the tail width so operand sizes agree
        let vkp = F32x4 { size: rem, ..vk };
        unsafe {
            let vv = F32x4::load_partial(v.as_ptr().add(main), rem);
            apply_scalar(kind, vv, vkp).store_at(out.as_mut_ptr().add(main));
        }
    }
}

/// Broadcast division in either operand order, IEEE-754 semantics.
pub fn scalar_div_f32(kind: ScalarDivOp, v: &[f32], k: f32, out: &mut [f32]) {
    debug_assert!(v.len() == out.len());

    let size = out.len();
    let main = size - (size % LANE_COUNT);
    let vk = unsafe { F32x4::splat(k) };

    for i in (0..main).step_by(LANE_COUNT) {
        unsafe {
            let vv = F32x4::load(v.as_ptr().add(i), LANE_COUNT);
            let r = match kind {
                ScalarDivOp::VecByScalar => vv / vk,
                ScalarDivOp::ScalarByVec => vk / vv,
            };
            r.store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        let rem = size - main;
        let vkp = F32x4 { size: rem, ..vk };
        unsafe {
            let vv = F32x4::load_partial(v.as_ptr().add(main), rem);
            let r = match kind {
                ScalarDivOp::VecByScalar => vv / vkp,
                ScalarDivOp::ScalarByVec => vkp / vv,
            };
            r.store_at(out.as_mut_ptr().add(main));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binop_kernel_matches_scalar_across_tail_widths() {
        for len in [0usize, 1, 3, 4, 5, 8, 11] {
            let a: Vec<f32> = (0..len).map(|i| i as f32 + 0.5).collect();
            let b: Vec<f32> = (0..len).map(|i| (i * 2) as f32 + 1.0).collect();
            let mut out = vec![0.0f32; len];

            binop_f32(BinOp::Add, &a, &b, &mut out);
            for i in 0..len {
                assert_eq!(out[i], a[i] + b[i], "add mismatch at {i}, len {len}");
            }

            binop_f32(BinOp::Sub, &a, &b, &mut out);
            for i in 0..len {
                assert_eq!(out[i], a[i] - b[i], "sub mismatch at {i}, len {len}");
            }
        }
    }

    #[test]
    fn test_div_kernel_propagates_inf_and_nan() {
        let a = [1.0f32, 0.0, -3.0];
        let b = [0.0f32, 0.0, 0.0];
        let mut out = [0.0f32; 3];

        div_f32(&a, &b, &mut out);
        assert_eq!(out[0], f32::INFINITY);
        assert!(out[1].is_nan());
        assert_eq!(out[2], f32::NEG_INFINITY);
    }

    #[test]
    fn test_scalar_kernel_reversed_subtraction() {
        let v = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let mut out = [0.0f32; 5];

        scalar_f32(ScalarOp::SubVecFromScalar, &v, 10.0, &mut out);
        for i in 0..v.len() {
            assert_eq!(out[i], 10.0 - v[i]);
        }
    }

    #[test]
    fn test_scalar_div_kernel_both_orders() {
        let v = [1.0f32, 2.0, 4.0, 8.0, 16.0];
        let mut out = [0.0f32; 5];

        scalar_div_f32(ScalarDivOp::VecByScalar, &v, 2.0, &mut out);
        assert_eq!(out, [0.5, 1.0, 2.0, 4.0, 8.0]);

        scalar_div_f32(ScalarDivOp::ScalarByVec, &v, 16.0, &mut out);
        assert_eq!(out, [16.0, 8.0, 4.0, 2.0, 1.0]);
    }
}
