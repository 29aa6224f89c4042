//! Evenly spaced sequences and angle conversion

use ndarray::Array1;

/// `count` evenly spaced values from `start` to `end`, both endpoints included
///
/// A count of one yields `[start]`; a count of zero yields an empty vector.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    Array1::linspace(start, end, count).to_vec()
}

#[inline]
pub fn radians(degrees: f64) -> f64 {
    degrees.to_radians()
}
