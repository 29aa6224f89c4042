/// Projection of aperture samples into the dome frame
use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3, Vector4};
use ndarray::Array2;

use super::kinematics::{mount_transform, Pose};
use crate::config::ObservatoryConfig;
use crate::error::ApertureError;
use crate::utils::vector_math::{aperture_plane_matrix, column_point};

/// Map aperture-plane samples (local X and Z) through the mount pose
///
/// # Returns
/// Array2 with shape (3, M) holding dome-frame points, one column per sample
pub fn sample_aperture(
    hour_angle: f64,
    declination: f64,
    x: &[f64],
    z: &[f64],
    config: &ObservatoryConfig,
) -> Result<Array2<f64>, ApertureError> {
    let local = aperture_plane_matrix(x, z)?;
    let pose = mount_transform(hour_angle, declination, config);
    Ok(transform_columns(&pose, &local))
}

/// Apply a pose to every column of a 3 x M point matrix
pub fn transform_columns(pose: &Pose, points: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros(points.raw_dim());
    for i in 0..points.ncols() {
        let p = pose.transform_point(&column_point(points, i));
        out[[0, i]] = p.x;
        out[[1, i]] = p.y;
        out[[2, i]] = p.z;
    }
    out
}

/// Dome-frame direction of the optical boresight (local +Y)
///
/// Finite difference of the pose and the pose shifted one unit along local Y,
/// both applied to the homogeneous origin. The result is not renormalised.
pub fn aperture_direction(
    hour_angle: f64,
    declination: f64,
    config: &ObservatoryConfig,
) -> Vector3<f64> {
    let pose = mount_transform(hour_angle, declination, config);
    let unit_y = Pose::from_parts(Translation3::new(0.0, 1.0, 0.0), UnitQuaternion::identity());
    let shifted = pose * unit_y;

    let difference = shifted.to_homogeneous() - pose.to_homogeneous();
    let origin = Point3::<f64>::origin().to_homogeneous();
    let d: Vector4<f64> = difference * origin;
    d.xyz()
}
