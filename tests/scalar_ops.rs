//! Scalar-broadcast operation contracts: both operand orders, identity
//! laws, and the empty-array edge case.

use lanevec::{
    add_scalar, div_scalar, mul_scalar, scalar_div, scalar_sub, sub_scalar, LaneVecError,
    PaddedArray,
};

fn f32s(values: &[f32]) -> PaddedArray<f32> {
    PaddedArray::from_slice(values).unwrap()
}

#[test]
fn test_add_scalar() {
    let v = f32s(&[1.0, 2.0, 3.0]);
    assert_eq!(add_scalar(&v, 2.0).to_vec(), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_sub_scalar() {
    let v = f32s(&[1.0, 2.0, 3.0]);
    assert_eq!(sub_scalar(&v, 2.0).to_vec(), vec![-1.0, 0.0, 1.0]);
}

#[test]
fn test_scalar_sub_reverses_operands() {
    let v = f32s(&[1.0, 2.0, 3.0]);
    let out = scalar_sub(&v, 2.0);

    for (i, &x) in v.as_slice().iter().enumerate() {
        assert_eq!(out.as_slice()[i], 2.0 - x);
    }
}

#[test]
fn test_mul_scalar() {
    let v = f32s(&[1.0, 2.0, 3.0]);
    assert_eq!(mul_scalar(&v, 3.0).to_vec(), vec![3.0, 6.0, 9.0]);
}

#[test]
fn test_div_scalar() {
    let v = f32s(&[2.0, 4.0, 8.0]);
    assert_eq!(div_scalar(&v, 2.0).unwrap().to_vec(), vec![1.0, 2.0, 4.0]);
}

#[test]
fn test_scalar_div_reverses_operands() {
    let v = f32s(&[1.0, 2.0, 4.0]);
    let out = scalar_div(&v, 1.0).unwrap();

    for (i, &x) in v.as_slice().iter().enumerate() {
        assert_eq!(out.as_slice()[i], 1.0 / x);
    }
}

#[test]
fn test_additive_identity_law() {
    let v = f32s(&[1.5, -2.0, 3.25, 0.0, 9.0, -7.0, 11.0, 0.5, 6.0]);
    assert_eq!(add_scalar(&v, 0.0), v);
}

#[test]
fn test_multiplicative_identity_law() {
    let v = f32s(&[1.5, -2.0, 3.25, 0.0, 9.0, -7.0, 11.0, 0.5, 6.0]);
    assert_eq!(mul_scalar(&v, 1.0), v);
}

#[test]
fn test_scalar_broadcast_on_empty_array() {
    let empty = f32s(&[]);

    assert!(add_scalar(&empty, 5.0).is_empty());
    assert!(sub_scalar(&empty, 5.0).is_empty());
    assert!(scalar_sub(&empty, 5.0).is_empty());
    assert!(mul_scalar(&empty, 5.0).is_empty());
    assert!(div_scalar(&empty, 5.0).unwrap().is_empty());
    assert!(scalar_div(&empty, 5.0).unwrap().is_empty());
}

#[test]
fn test_float_scalar_division_by_zero_is_not_an_error() {
    let v = f32s(&[1.0, -2.0, 0.0]);

    let out = div_scalar(&v, 0.0).unwrap().to_vec();
    assert_eq!(out[0], f32::INFINITY);
    assert_eq!(out[1], f32::NEG_INFINITY);
    assert!(out[2].is_nan());

    let out = scalar_div(&v, 1.0).unwrap().to_vec();
    assert_eq!(out[2], f32::INFINITY); // 1 / 0
}

#[test]
fn test_integer_div_scalar_by_zero_is_an_error() {
    let v = PaddedArray::from_slice(&[1i32, 2, 3]).unwrap();

    let err = div_scalar(&v, 0).unwrap_err();
    assert_eq!(err, LaneVecError::DivideByZero { index: 0 });
}

#[test]
fn test_integer_scalar_div_reports_zero_element_index() {
    let v = PaddedArray::from_slice(&[5i64, 2, 0, 4]).unwrap();

    let err = scalar_div(&v, 10).unwrap_err();
    assert_eq!(err, LaneVecError::DivideByZero { index: 2 });
}

#[test]
fn test_integer_scalar_ops() {
    let v = PaddedArray::from_slice(&[6i64, -9, 12]).unwrap();

    assert_eq!(add_scalar(&v, 1).to_vec(), vec![7, -8, 13]);
    assert_eq!(sub_scalar(&v, 1).to_vec(), vec![5, -10, 11]);
    assert_eq!(scalar_sub(&v, 1).to_vec(), vec![-5, 10, -11]);
    assert_eq!(mul_scalar(&v, -2).to_vec(), vec![-12, 18, -24]);
    assert_eq!(div_scalar(&v, 3).unwrap().to_vec(), vec![2, -3, 4]);
    assert_eq!(scalar_div(&v, 36).unwrap().to_vec(), vec![6, -4, 3]);
}

#[test]
fn test_lengths_across_lane_boundaries() {
    for len in [1usize, 4, 7, 8, 9, 16, 31, 33] {
        let values: Vec<f32> = (0..len).map(|i| i as f32 - 3.0).collect();
        let v = f32s(&values);

        let out = scalar_sub(&v, 100.0);
        assert_eq!(out.len(), len);
        for (i, &x) in values.iter().enumerate() {
            assert_eq!(out.as_slice()[i], 100.0 - x, "mismatch at {i}, len {len}");
        }
    }
}
