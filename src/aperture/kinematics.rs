//! Forward kinematics of the equatorial mount
//!
//! The pose maps aperture-local coordinates into the dome frame. Each link of
//! the chain is right-multiplied onto the running transform, so every step
//! acts in the frame left behind by the previous one.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::config::ObservatoryConfig;
use crate::utils::numeric::radians;

/// Rigid transform from aperture-local coordinates to the dome frame
pub type Pose = Isometry3<f64>;

#[inline]
fn translation(x: f64, y: f64, z: f64) -> Pose {
    Pose::from_parts(Translation3::new(x, y, z), UnitQuaternion::identity())
}

#[inline]
fn rotation(axis: &Unit<Vector3<f64>>, angle_deg: f64) -> Pose {
    Pose::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_axis_angle(axis, radians(angle_deg)),
    )
}

/// Pose of the aperture for a pointing given in degrees
///
/// Frame 0 -> 1: pier base up to the RA axis.
/// Frame 1 -> 2: co-latitude tilt, hour-angle rotation, out to the Dec axis.
/// Frame 2 -> 3: declination rotation, across to the optical axis.
pub fn mount_transform(hour_angle: f64, declination: f64, config: &ObservatoryConfig) -> Pose {
    let mount = &config.mount;

    let mut pose = Pose::identity();
    pose *= translation(0.0, 0.0, mount.pier_to_ra_axis);

    pose *= rotation(&Vector3::x_axis(), 90.0 - config.latitude_deg);
    pose *= rotation(&Vector3::z_axis(), -hour_angle);
    pose *= translation(0.0, 0.0, mount.ra_to_dec_axis);

    pose *= rotation(&Vector3::x_axis(), declination);
    pose *= translation(-mount.dec_to_optical_axis, 0.0, 0.0);

    pose
}
