//! The vector operation engine.
//!
//! Every operation here is eager and pure: it reads one or two arrays (or an
//! array and a scalar), allocates a fresh [`PaddedArray`] for the result and
//! never mutates its inputs. For two-array operations the result length is
//! the longer operand's length; the shorter operand is virtually extended
//! with the operation's identity element (0 for add/sub, 1 for a missing
//! multiplier or divisor, 0 for a missing numerator).
//!
//! The common prefix of two operands is processed in full vector lanes
//! straight over the padded buffers: padding keeps every lane group in
//! bounds, and because both operands pad with the additive identity, lanes
//! that stray past the logical data for add/sub/mul either get overwritten by
//! the extension pass or write the identity into the result's own padding.
//! Division is the exception and only ever reads real elements, so a zero
//! pad value can never show up as a divisor.

use rayon::prelude::*;

use crate::array::PaddedArray;
use crate::element::{BinOp, Element, ScalarDivOp, ScalarOp};
use crate::error::{LaneVecError, Result};
use crate::simd::lane_count;

/// Work size (elements) above which the engine fans out to the rayon pool.
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Block handed to each worker; a multiple of every supported lane width so
/// only the final block can be partial.
const PARALLEL_BLOCK: usize = 1 << 12;

/// Elementwise sum. Missing tail elements of the shorter operand count as 0,
/// so the excess result elements equal the longer array's own values.
pub fn add<T: Element>(a: &PaddedArray<T>, b: &PaddedArray<T>) -> PaddedArray<T> {
    binary_op(a, b, BinOp::Add)
}

/// Elementwise difference `a[i] - b[i]`. A missing `b` element contributes 0
/// (excess equals `a`); a missing `a` element contributes 0 on the left
/// (excess equals `-b`).
pub fn sub<T: Element>(a: &PaddedArray<T>, b: &PaddedArray<T>) -> PaddedArray<T> {
    binary_op(a, b, BinOp::Sub)
}

/// Elementwise product. Missing tail elements of the shorter operand count
/// as 1, so the excess result elements equal the longer array's own values.
pub fn mul<T: Element>(a: &PaddedArray<T>, b: &PaddedArray<T>) -> PaddedArray<T> {
    binary_op(a, b, BinOp::Mul)
}

/// Elementwise quotient `a[i] / b[i]`.
///
/// A missing divisor element counts as 1 (excess equals `a`); a missing
/// numerator element counts as 0, so the excess is `0 / b[i]`. Integer
/// division by zero — anywhere a real or virtual numerator meets a real zero
/// divisor — fails with [`LaneVecError::DivideByZero`]; float division by
/// zero yields ±Inf/NaN per IEEE-754 and is not an error.
pub fn div<T: Element>(a: &PaddedArray<T>, b: &PaddedArray<T>) -> Result<PaddedArray<T>> {
    let result_len = a.len().max(b.len());
    let common = a.len().min(b.len());
    let mut out = PaddedArray::zeroed(result_len);

    // real data only: pad values must never be used as divisors
    T::div_slices(
        &a.as_slice()[..common],
        &b.as_slice()[..common],
        &mut out.padded_mut()[..common],
    )?;

    if a.len() > b.len() {
        // missing divisors are the multiplicative identity
        out.padded_mut()[common..result_len].copy_from_slice(&a.as_slice()[common..]);
    } else if b.len() > a.len() {
        // missing numerators are zero
        let rest = &b.as_slice()[common..];
        let dst = &mut out.padded_mut()[common..result_len];
        for (i, (o, &y)) in dst.iter_mut().zip(rest).enumerate() {
            *o = T::zero()
                .checked_div(y)
                .ok_or(LaneVecError::DivideByZero { index: common + i })?;
        }
    }

    Ok(out)
}

/// Broadcast sum `a[i] + k`.
pub fn add_scalar<T: Element>(a: &PaddedArray<T>, k: T) -> PaddedArray<T> {
    scalar_op(a, k, ScalarOp::Add)
}

/// Broadcast difference `a[i] - k`.
pub fn sub_scalar<T: Element>(a: &PaddedArray<T>, k: T) -> PaddedArray<T> {
    scalar_op(a, k, ScalarOp::SubScalarFromVec)
}

/// Broadcast difference with reversed operands: `k - a[i]`.
pub fn scalar_sub<T: Element>(a: &PaddedArray<T>, k: T) -> PaddedArray<T> {
    scalar_op(a, k, ScalarOp::SubVecFromScalar)
}

/// Broadcast product `a[i] * k`.
pub fn mul_scalar<T: Element>(a: &PaddedArray<T>, k: T) -> PaddedArray<T> {
    scalar_op(a, k, ScalarOp::Mul)
}

/// Broadcast quotient `a[i] / k`. Integer `k == 0` fails at the first
/// element; float semantics are IEEE-754.
pub fn div_scalar<T: Element>(a: &PaddedArray<T>, k: T) -> Result<PaddedArray<T>> {
    scalar_div_op(a, k, ScalarDivOp::VecByScalar)
}

/// Broadcast quotient with reversed operands: `k / a[i]`. An integer zero in
/// `a` fails with [`LaneVecError::DivideByZero`] at its index.
pub fn scalar_div<T: Element>(a: &PaddedArray<T>, k: T) -> Result<PaddedArray<T>> {
    scalar_div_op(a, k, ScalarDivOp::ScalarByVec)
}

fn binary_op<T: Element>(a: &PaddedArray<T>, b: &PaddedArray<T>, op: BinOp) -> PaddedArray<T> {
    let result_len = a.len().max(b.len());
    let common = a.len().min(b.len());
    let mut out = PaddedArray::zeroed(result_len);

    // The common prefix rounded up to the lane width: always in bounds of
    // all three padded buffers, never a partial group.
    let lane_end = common.next_multiple_of(lane_count::<T>());
    {
        let ap = &a.padded()[..lane_end];
        let bp = &b.padded()[..lane_end];
        let dst = &mut out.padded_mut()[..lane_end];

        if lane_end >= PARALLEL_THRESHOLD {
            dst.par_chunks_mut(PARALLEL_BLOCK)
                .zip(ap.par_chunks(PARALLEL_BLOCK))
                .zip(bp.par_chunks(PARALLEL_BLOCK))
                .for_each(|((o, x), y)| T::binop_slices(op, x, y, o));
        } else {
            T::binop_slices(op, ap, bp, dst);
        }
    }

    // identity-extended region where the shorter operand has run out
    if a.len() > b.len() {
        // a + 0, a - 0 and a * 1 all reduce to a's own values
        out.padded_mut()[common..result_len].copy_from_slice(&a.as_slice()[common..]);
    } else if b.len() > a.len() {
        let rest = &b.as_slice()[common..];
        match op {
            BinOp::Add | BinOp::Mul => {
                out.padded_mut()[common..result_len].copy_from_slice(rest);
            }
            BinOp::Sub => {
                let dst = &mut out.padded_mut()[common..result_len];
                for (o, &y) in dst.iter_mut().zip(rest) {
                    *o = T::zero() - y;
                }
            }
        }
    }

    out
}

fn scalar_op<T: Element>(a: &PaddedArray<T>, k: T, kind: ScalarOp) -> PaddedArray<T> {
    let len = a.len();
    let mut out = PaddedArray::zeroed(len);

    let src = a.as_slice();
    let dst = &mut out.padded_mut()[..len];

    if len >= PARALLEL_THRESHOLD {
        dst.par_chunks_mut(PARALLEL_BLOCK)
            .zip(src.par_chunks(PARALLEL_BLOCK))
            .for_each(|(o, v)| T::scalar_slices(kind, v, k, o));
    } else {
        T::scalar_slices(kind, src, k, dst);
    }

    out
}

// Serial on purpose: the first zero divisor in index order decides the error.
fn scalar_div_op<T: Element>(a: &PaddedArray<T>, k: T, kind: ScalarDivOp) -> Result<PaddedArray<T>> {
    let len = a.len();
    let mut out = PaddedArray::zeroed(len);

    T::scalar_div_slices(kind, a.as_slice(), k, &mut out.padded_mut()[..len])?;

    Ok(out)
}

impl<T: Element> std::ops::Add for &PaddedArray<T> {
    type Output = PaddedArray<T>;

    fn add(self, rhs: Self) -> Self::Output {
        add(self, rhs)
    }
}

impl<T: Element> std::ops::Sub for &PaddedArray<T> {
    type Output = PaddedArray<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        sub(self, rhs)
    }
}

impl<T: Element> std::ops::Mul for &PaddedArray<T> {
    type Output = PaddedArray<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        mul(self, rhs)
    }
}
