//! The fixed element type family the engine operates on.
//!
//! Every array holds exactly one of the types implementing [`Element`]: `f32`,
//! `f64`, `i32` or `i64`. The trait carries the numeric contract the operation
//! engine needs (additive and multiplicative identities, checked division) and
//! the slice kernels that do the actual lane work. The kernel methods have
//! scalar default bodies; `f32` overrides them with the SIMD backend selected
//! at build time, so every other element type stays correct on the same padded
//! layout through the auto-vectorizable scalar loops.

use std::fmt;
use std::ops::Sub;

use num::{NumCast, One, Zero};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Elementwise binary operators with total semantics.
///
/// Division is deliberately absent: it is fallible for integer element types
/// and flows through [`Element::div_slices`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

impl BinOp {
    #[inline(always)]
    pub(crate) fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
        }
    }
}

/// Scalar-broadcast operators with total semantics.
///
/// Subtraction appears twice because the operand order matters: `sub_scalar`
/// computes `v[i] - k`, `scalar_sub` computes `k - v[i]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarOp {
    Add,
    Mul,
    SubScalarFromVec,
    SubVecFromScalar,
}

impl ScalarOp {
    #[inline(always)]
    pub(crate) fn apply<T: Element>(self, v: T, k: T) -> T {
        match self {
            ScalarOp::Add => v + k,
            ScalarOp::Mul => v * k,
            ScalarOp::SubScalarFromVec => v - k,
            ScalarOp::SubVecFromScalar => k - v,
        }
    }
}

/// Scalar-broadcast division, in both operand orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarDivOp {
    /// `v[i] / k`
    VecByScalar,
    /// `k / v[i]`
    ScalarByVec,
}

impl ScalarDivOp {
    #[inline(always)]
    pub(crate) fn apply<T: Element>(self, v: T, k: T) -> Option<T> {
        match self {
            ScalarDivOp::VecByScalar => v.checked_div(k),
            ScalarDivOp::ScalarByVec => k.checked_div(v),
        }
    }
}

/// Numeric element contract for [`PaddedArray`](crate::PaddedArray).
///
/// Sealed: implemented for `f32`, `f64`, `i32` and `i64` only. Storage relies
/// on the all-zero bit pattern of these types being the additive identity.
pub trait Element:
    private::Sealed
    + Copy
    + PartialEq
    + fmt::Debug
    + Zero
    + One
    + Sub<Output = Self>
    + NumCast
    + Send
    + Sync
    + 'static
{
    /// Division following the element family's semantics: `None` marks an
    /// integer division by zero, floating variants always produce a value
    /// (±Inf/NaN per IEEE-754). Integer `MIN / -1` wraps.
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// Elementwise `out[i] = a[i] op b[i]` over slices of equal length.
    #[inline]
    fn binop_slices(op: BinOp, a: &[Self], b: &[Self], out: &mut [Self]) {
        debug_assert!(a.len() == b.len() && a.len() == out.len());

        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = op.apply(x, y);
        }
    }

    /// Elementwise `out[i] = a[i] / b[i]`; the error index is relative to the
    /// start of the slices.
    #[inline]
    fn div_slices(a: &[Self], b: &[Self], out: &mut [Self]) -> crate::error::Result<()> {
        debug_assert!(a.len() == b.len() && a.len() == out.len());

        for (i, ((o, &x), &y)) in out.iter_mut().zip(a).zip(b).enumerate() {
            *o = x
                .checked_div(y)
                .ok_or(crate::error::LaneVecError::DivideByZero { index: i })?;
        }
        Ok(())
    }

    /// Broadcast `out[i] = v[i] op k` (or `k op v[i]`, per `kind`).
    #[inline]
    fn scalar_slices(kind: ScalarOp, v: &[Self], k: Self, out: &mut [Self]) {
        debug_assert!(v.len() == out.len());

        for (o, &x) in out.iter_mut().zip(v) {
            *o = kind.apply(x, k);
        }
    }

    /// Broadcast division in either operand order; the error index is
    /// relative to the start of the slices.
    #[inline]
    fn scalar_div_slices(
        kind: ScalarDivOp,
        v: &[Self],
        k: Self,
        out: &mut [Self],
    ) -> crate::error::Result<()> {
        debug_assert!(v.len() == out.len());

        for (i, (o, &x)) in out.iter_mut().zip(v).enumerate() {
            *o = kind
                .apply(x, k)
                .ok_or(crate::error::LaneVecError::DivideByZero { index: i })?;
        }
        Ok(())
    }
}

impl Element for f32 {
    #[inline(always)]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }

    #[cfg(avx2)]
    #[inline]
    fn binop_slices(op: BinOp, a: &[Self], b: &[Self], out: &mut [Self]) {
        crate::simd::avx2::binop_f32(op, a, b, out);
    }

    #[cfg(avx2)]
    #[inline]
    fn div_slices(a: &[Self], b: &[Self], out: &mut [Self]) -> crate::error::Result<()> {
        crate::simd::avx2::div_f32(a, b, out);
        Ok(())
    }

    #[cfg(avx2)]
    #[inline]
    fn scalar_slices(kind: ScalarOp, v: &[Self], k: Self, out: &mut [Self]) {
        crate::simd::avx2::scalar_f32(kind, v, k, out);
    }

    #[cfg(avx2)]
    #[inline]
    fn scalar_div_slices(
        kind: ScalarDivOp,
        v: &[Self],
        k: Self,
        out: &mut [Self],
    ) -> crate::error::Result<()> {
        crate::simd::avx2::scalar_div_f32(kind, v, k, out);
        Ok(())
    }

    #[cfg(neon)]
    #[inline]
    fn binop_slices(op: BinOp, a: &[Self], b: &[Self], out: &mut [Self]) {
        crate::simd::neon::binop_f32(op, a, b, out);
    }

    #[cfg(neon)]
    #[inline]
    fn div_slices(a: &[Self], b: &[Self], out: &mut [Self]) -> crate::error::Result<()> {
        crate::simd::neon::div_f32(a, b, out);
        Ok(())
    }

    #[cfg(neon)]
    #[inline]
    fn scalar_slices(kind: ScalarOp, v: &[Self], k: Self, out: &mut [Self]) {
        crate::simd::neon::scalar_f32(kind, v, k, out);
    }

    #[cfg(neon)]
    #[inline]
    fn scalar_div_slices(
        kind: ScalarDivOp,
        v: &[Self],
        k: Self,
        out: &mut [Self],
    ) -> crate::error::Result<()> {
        crate::simd::neon::scalar_div_f32(kind, v, k, out);
        Ok(())
    }
}

impl Element for f64 {
    #[inline(always)]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }
}

impl Element for i32 {
    #[inline(always)]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(self.wrapping_div(rhs))
        }
    }
}

impl Element for i64 {
    #[inline(always)]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(self.wrapping_div(rhs))
        }
    }
}
