//! Aligned, padded array storage.
//!
//! [`PaddedArray`] owns a contiguous buffer allocated at the vector alignment
//! of the compiled backend, sized to the smallest multiple of the lane width
//! that covers the logical length. The padding region is kept at the additive
//! identity (all-zero bits for every supported element type), which lets the
//! operation engine run full-width lanes over the whole buffer without a
//! per-element bounds check. Callers only ever observe the logical view.

use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr::NonNull;
use std::slice;

use num::{NumCast, ToPrimitive};

use crate::element::Element;
use crate::error::{LaneVecError, Result};
use crate::simd::{buffer_alignment, lane_count};

/// Maximum logical length for an array of `T`.
///
/// Kept well below `isize::MAX / size_of::<T>()` so that rounding the
/// capacity up to the lane width and computing the byte size can never
/// overflow.
pub const fn max_len<T>() -> usize {
    (isize::MAX as usize / 2) / std::mem::size_of::<T>()
}

/// A fixed-width numeric array with SIMD-padded storage.
///
/// The buffer is exclusively owned, aligned for the compiled vector backend,
/// and never mutated by arithmetic operations: every operation allocates a
/// fresh result. Immutability after construction makes shared references
/// freely usable across threads.
///
/// # Examples
///
/// ```rust
/// use lanevec::PaddedArray;
///
/// let a = PaddedArray::from_slice(&[1.0f32, 2.0, 3.0]).unwrap();
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
/// ```
pub struct PaddedArray<T: Element> {
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    _marker: PhantomData<T>,
}

// The buffer is exclusively owned and never mutated after construction.
unsafe impl<T: Element> Send for PaddedArray<T> {}
unsafe impl<T: Element> Sync for PaddedArray<T> {}

#[inline(always)]
fn layout_for<T: Element>(capacity: usize) -> Layout {
    // max_len keeps capacity * size_of::<T>() well inside isize::MAX
    Layout::from_size_align(capacity * std::mem::size_of::<T>(), buffer_alignment::<T>())
        .expect("Invalid layout")
}

impl<T: Element> PaddedArray<T> {
    /// Copies `values` into a freshly allocated padded buffer.
    ///
    /// The capacity is rounded up to the lane width and the padding region is
    /// filled with the additive identity. Fails with
    /// [`LaneVecError::LengthLimitExceeded`] above [`max_len`]; allocation
    /// failure itself is fatal and aborts via the global allocation error
    /// handler.
    pub fn from_slice(values: &[T]) -> Result<Self> {
        if values.len() > max_len::<T>() {
            return Err(LaneVecError::LengthLimitExceeded {
                len: values.len(),
                max: max_len::<T>(),
            });
        }

        let mut array = Self::zeroed(values.len());
        array.padded_mut()[..values.len()].copy_from_slice(values);
        Ok(array)
    }

    /// Converts a sequence of any primitive numeric type into an array of `T`,
    /// validating every value up front.
    ///
    /// This is the typed boundary for hosts with heterogeneous numeric input:
    /// the element type is fixed here, once, instead of leaking mixed types
    /// into the engine. A value that is not exactly representable as `T`
    /// (NaN into an integer type, out-of-range magnitude) fails with
    /// [`LaneVecError::InvalidElement`] naming the offending index.
    pub fn from_cast_slice<U>(values: &[U]) -> Result<Self>
    where
        U: Copy + fmt::Debug + ToPrimitive,
    {
        if values.len() > max_len::<T>() {
            return Err(LaneVecError::LengthLimitExceeded {
                len: values.len(),
                max: max_len::<T>(),
            });
        }

        let mut array = Self::zeroed(values.len());
        {
            let dst = array.padded_mut();
            for (i, &v) in values.iter().enumerate() {
                dst[i] = <T as NumCast>::from(v).ok_or_else(|| LaneVecError::InvalidElement {
                    index: i,
                    message: format!("{v:?} is not representable as the element type"),
                })?;
            }
        }
        Ok(array)
    }

    /// Allocates a zero-filled array of logical length `len`.
    ///
    /// Zero bytes are the additive identity for every supported element type,
    /// so both the logical region and the padding start out valid. Callers
    /// must have already bounded `len` by [`max_len`].
    pub(crate) fn zeroed(len: usize) -> Self {
        let capacity = len.next_multiple_of(lane_count::<T>());

        if capacity == 0 {
            return Self {
                ptr: NonNull::dangling(),
                len: 0,
                capacity: 0,
                _marker: PhantomData,
            };
        }

        let layout = layout_for::<T>(capacity);
        let ptr = unsafe { alloc_zeroed(layout) as *mut T };

        if ptr.is_null() {
            handle_alloc_error(layout);
        }

        Self {
            // SAFETY: null-checked above; layout covers `capacity` elements.
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            len,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Logical element count. O(1), never includes padding.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical capacity of the buffer: the smallest multiple of the lane
    /// width that is `>= len()`.
    #[inline]
    pub fn padded_capacity(&self) -> usize {
        self.capacity
    }

    /// The logical view: the first `len()` elements in original order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the buffer holds `capacity >= len` initialized elements.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Materializes the logical view as an owned `Vec`, padding excluded.
    #[inline]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Full buffer including the padding region. Engine-internal.
    #[inline]
    pub(crate) fn padded(&self) -> &[T] {
        // SAFETY: all `capacity` elements are initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }

    /// Mutable full buffer. Only used while a result array is being built;
    /// arrays handed to callers are never mutated again.
    #[inline]
    pub(crate) fn padded_mut(&mut self) -> &mut [T] {
        // SAFETY: exclusive borrow of an exclusively owned buffer.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }
}

impl<T: Element> Drop for PaddedArray<T> {
    fn drop(&mut self) {
        if self.capacity != 0 {
            // SAFETY: allocated in `zeroed` with this exact layout.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout_for::<T>(self.capacity)) };
        }
    }
}

impl<T: Element> Clone for PaddedArray<T> {
    fn clone(&self) -> Self {
        let mut array = Self::zeroed(self.len);
        array.padded_mut()[..self.len].copy_from_slice(self.as_slice());
        array
    }
}

impl<T: Element> Deref for PaddedArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> PartialEq for PaddedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element> PartialEq<[T]> for PaddedArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Element> fmt::Debug for PaddedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_lane_multiple() {
        for len in 0..40 {
            let values: Vec<f32> = (0..len).map(|i| i as f32).collect();
            let array = PaddedArray::from_slice(&values).unwrap();

            assert_eq!(array.len(), len);
            assert!(array.padded_capacity() >= len);
            assert_eq!(array.padded_capacity() % lane_count::<f32>(), 0);
        }
    }

    #[test]
    fn test_padding_is_zero() {
        let array = PaddedArray::from_slice(&[1.0f32, 2.0, 3.0]).unwrap();
        for &pad in &array.padded()[array.len()..] {
            assert_eq!(pad, 0.0);
        }
    }

    #[test]
    fn test_empty_array() {
        let array = PaddedArray::<f32>::from_slice(&[]).unwrap();
        assert!(array.is_empty());
        assert_eq!(array.padded_capacity(), 0);
        assert_eq!(array.to_vec(), Vec::<f32>::new());
    }

    #[test]
    fn test_roundtrip_preserves_order_and_values() {
        let values = vec![3.5f64, -0.0, 7.25, f64::MAX, f64::MIN_POSITIVE];
        let array = PaddedArray::from_slice(&values).unwrap();
        assert_eq!(array.to_vec(), values);
    }

    #[test]
    fn test_special_floats_roundtrip() {
        let values = [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, -0.0];
        let array = PaddedArray::from_slice(&values).unwrap();
        let out = array.to_vec();

        assert_eq!(out[0], f32::INFINITY);
        assert_eq!(out[1], f32::NEG_INFINITY);
        assert!(out[2].is_nan());
        assert_eq!(out[3], -0.0);
        assert!(out[3].is_sign_negative());
    }

    #[test]
    fn test_cast_constructor() {
        let array = PaddedArray::<f64>::from_cast_slice(&[1i32, 2, 3]).unwrap();
        assert_eq!(array.to_vec(), vec![1.0, 2.0, 3.0]);

        let array = PaddedArray::<i32>::from_cast_slice(&[1.0f64, 2.0]).unwrap();
        assert_eq!(array.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_cast_constructor_rejects_unrepresentable() {
        let err = PaddedArray::<i32>::from_cast_slice(&[1.0f64, f64::NAN]).unwrap_err();
        match err {
            LaneVecError::InvalidElement { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_clone_is_deep() {
        let a = PaddedArray::from_slice(&[1i64, 2, 3]).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        drop(a);
        assert_eq!(b.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_deref_gives_logical_view() {
        let a = PaddedArray::from_slice(&[1.0f32, 2.0, 3.0]).unwrap();
        assert_eq!(a.iter().sum::<f32>(), 6.0);
        assert_eq!(a[2], 3.0);
    }
}
