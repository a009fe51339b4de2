//! Fixed-width numeric arrays with SIMD-padded storage and vectorized
//! elementwise arithmetic.
//!
//! The crate has two halves. [`PaddedArray`] owns an aligned buffer whose
//! capacity is rounded up to the vector lane width of the backend selected at
//! build time, with the padding region held at the additive identity. The
//! operation engine ([`ops`]) runs elementwise and scalar-broadcast
//! arithmetic over that layout in full-width lane groups, extending the
//! shorter of two mismatched operands with the operation's identity element.
//!
//! The build script probes the build machine and compiles exactly one
//! backend (AVX2, NEON, or the scalar fallback with a lane width of 1), so
//! results are identical everywhere; only throughput changes.
//!
//! ```rust
//! use lanevec::{add, mul_scalar, PaddedArray};
//!
//! let a = PaddedArray::from_slice(&[1.0f32, 2.0, 3.0]).unwrap();
//! let b = PaddedArray::from_slice(&[10.0f32, 20.0]).unwrap();
//!
//! // the shorter operand extends with the additive identity
//! assert_eq!(add(&a, &b).to_vec(), vec![11.0, 22.0, 3.0]);
//! assert_eq!(mul_scalar(&a, 2.0).to_vec(), vec![2.0, 4.0, 6.0]);
//! ```

pub mod array;
pub mod element;
pub mod error;
pub mod ops;
pub mod simd;

pub use array::{max_len, PaddedArray};
pub use element::Element;
pub use error::{LaneVecError, Result};
pub use ops::{
    add, add_scalar, div, div_scalar, mul, mul_scalar, scalar_div, scalar_sub, sub, sub_scalar,
};
pub use simd::lane_count;
