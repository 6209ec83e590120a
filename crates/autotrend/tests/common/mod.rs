//! Shared test utilities for autotrend tests.

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// `y[i] = i` for `i in 0..len`.
#[allow(dead_code)]
pub fn linear_ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

/// Linear ramp of length 20 with a spike of `30.0` at index 12.
#[allow(dead_code)]
pub fn ramp_with_outlier() -> Vec<f64> {
    let mut data = linear_ramp(20);
    data[12] = 30.0;
    data
}

/// Rise, plateau, fall: three slopes over 60 points, no noise.
#[allow(dead_code)]
pub fn piecewise_linear() -> Vec<f64> {
    (0..60)
        .map(|i| match i {
            0..=24 => 0.5 * f64::from(i),
            25..=39 => 12.0,
            _ => 12.0 - 0.8 * f64::from(i - 39),
        })
        .collect()
}
