/// Vector math utilities for aperture projection
///
/// Point sets are stored as 3 x M arrays with one column per sample, which
/// keeps the projected aperture order-aligned with the disk samples.
use nalgebra::{Point3, Rotation3, Vector3};
use ndarray::Array2;

use crate::error::ApertureError;
use crate::utils::numeric::radians;

/// Place 2D aperture-plane samples on the local X and Z axes
///
/// # Arguments
/// * `x` - Coordinates along the local X axis
/// * `z` - Coordinates along the local Z axis
///
/// # Returns
/// Array2 with shape (3, M); the Y row (optical axis) is zero
pub fn aperture_plane_matrix(x: &[f64], z: &[f64]) -> Result<Array2<f64>, ApertureError> {
    if x.len() != z.len() {
        return Err(ApertureError::LengthMismatch {
            x: x.len(),
            z: z.len(),
        });
    }

    let mut points = Array2::<f64>::zeros((3, x.len()));
    for (i, (&xi, &zi)) in x.iter().zip(z.iter()).enumerate() {
        points[[0, i]] = xi;
        points[[2, i]] = zi;
    }
    Ok(points)
}

/// Extract column `i` of a 3 x M point matrix
#[inline]
pub fn column_point(points: &Array2<f64>, i: usize) -> Point3<f64> {
    Point3::new(points[[0, i]], points[[1, i]], points[[2, i]])
}

/// Rotate a point about the vertical (Z) axis by `angle_deg`
pub fn rotate_about_z(point: &Point3<f64>, angle_deg: f64) -> Point3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), radians(angle_deg)) * point
}
