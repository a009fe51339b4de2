pub mod f32x4;
mod kernels;

pub use kernels::{binop_f32, div_f32, scalar_div_f32, scalar_f32};
