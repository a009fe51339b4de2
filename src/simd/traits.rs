//! Register-level trait shared by the architecture backends.

/// A vector register holding up to `LANES` elements of `T` plus a count of
/// valid lanes, so partial groups at a slice tail flow through the same
/// load/compute/store shape as full groups.
pub trait SimdVec<T>: Sized {
    /// Number of elements one register holds.
    const LANES: usize;

    /// Loads exactly `LANES` elements.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to at least `LANES` valid elements.
    unsafe fn load(ptr: *const T, size: usize) -> Self;

    /// Loads `size < LANES` elements; the remaining lanes are zeroed.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to at least `size` valid elements.
    unsafe fn load_partial(ptr: *const T, size: usize) -> Self;

    /// Creates a register with every lane set to `value`.
    ///
    /// # Safety
    ///
    /// Requires the backend's target feature to be enabled, which the build
    /// script guarantees for the compiled backend.
    unsafe fn splat(value: T) -> Self;

    /// Stores the valid lanes at `ptr`, choosing the full or partial store
    /// based on the register's size.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to writable memory for at least
    /// `self` valid-lane elements.
    unsafe fn store_at(&self, ptr: *mut T);

    /// Stores only the valid lanes of a partial register.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to writable memory for the valid
    /// lanes; the register's size must be below `LANES`.
    unsafe fn store_at_partial(&self, ptr: *mut T);
}
