//! AVX2 slice kernels for the f32 element type.
//!
//! Each kernel walks full 8-lane groups and finishes with one masked partial
//! group, so any slice length is handled without a scalar tail loop. Division
//! here is the float path only: zero divisors produce ±Inf/NaN and never
//! trap, so dead lanes of a partial group (zero-filled by the masked load)
//! are harmless and get discarded by the masked store.

use crate::element::{BinOp, ScalarDivOp, ScalarOp};
use crate::simd::traits::SimdVec;

use super::f32x8::{F32x8, LANE_COUNT};

#[inline(always)]
fn apply_binop(op: BinOp, a: F32x8, b: F32x8) -> F32x8 {
    match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
    }
}

#[inline(always)]
fn apply_scalar(kind: ScalarOp, v: F32x8, k: F32x8) -> F32x8 {
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
            let va = F32x8::load(a.as_ptr().add(i), LANE_COUNT);
            let vb = F32x8::load(b.as_ptr().add(i), LANE_COUNT);
            apply_binop(op, va, vb).store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        unsafe {
            let va = F32x8::load_partial(a.as_ptr().add(main), size - main);
            let vb = F32x8::load_partial(b.as_ptr().add(main), size - main);
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
            let va = F32x8::load(a.as_ptr().add(i), LANE_COUNT);
            let vb = F32x8::load(b.as_ptr().add(i), LANE_COUNT);
            (va / vb).store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        unsafe {
            let va = F32x8::load_partial(a.as_ptr().add(main), size - main);
            let vb = F32x8::load_partial(b.as_ptr().add(main), size - main);
            (va / vb).store_at(out.as_mut_ptr().add(main));
        }
    }
}

/// Broadcast `out[i] = v[i] op k` (or `k op v[i]`).
pub fn scalar_f32(kind: ScalarOp, v: &[f32], k: f32, out: &mut [f32]) {
    debug_assert!(v.len() == out.len());

    let size = out.len();
    let main = size - (size % LANE_COUNT);
    let vk = unsafe { F32x8::splat(k) };

    for i in (0..main).step_by(LANE_COUNT) {
        unsafe {
            let vv = F32x8::load(v.as_ptr().add(i), LANE_COUNT);
            apply_scalar(kind, vv, vk).store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        let rem = size - main;
        // shrink the splat to the tail width so operand sizes agree
        let vkp = F32x8 { size: rem, ..vk };
        unsafe {
            let vv = F32x8::load_partial(v.as_ptr().add(main), rem);
            apply_scalar(kind, vv, vkp).store_at(out.as_mut_ptr().add(main));
        }
    }
}

/// Broadcast division in either operand order, IEEE-754 semantics.
pub fn scalar_div_f32(kind: ScalarDivOp, v: &[f32], k: f32, out: &mut [f32]) {
    debug_assert!(v.len() == out.len());

    let size = out.len();
    let main = size - (size % LANE_COUNT);
    let vk = unsafe { F32x8::splat(k) };

    for i in (0..main).step_by(LANE_COUNT) {
        unsafe {
            let vv = F32x8::load(v.as_ptr().add(i), LANE_COUNT);
            let r = match kind {
                ScalarDivOp::VecByScalar => vv / vk,
                ScalarDivOp::ScalarByVec => vk / vv,
            };
            r.store_at(out.as_mut_ptr().add(i));
        }
    }

    if main < size {
        let rem = size - main;
        let vkp = F32x8 { size: rem, ..vk };
        unsafe {
            let vv = F32x8::load_partial(v.as_ptr().add(main), rem);
            let r = match kind {
                ScalarDivOp::VecByScalar => vv / vkp,
                ScalarDivOp::ScalarByVec => vkp / vv,
            };
            r.store_at(out.as_mut_ptr().add(main));
        }
    }
}
