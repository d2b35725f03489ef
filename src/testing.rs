//! Testing helpers.

use assert_float_eq::*;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that a set of probabilities sums to `expected` within an absolute `epsilon`.
pub fn assert_probs_sum(expected: f64, probs: &[f64], epsilon: f64) {
    let sum: f64 = probs.iter().sum();
    assert_float_absolute_eq!(expected, sum, epsilon);
}
