//! Telescope aperture model
//!
//! An [`Aperture`] holds the static description of the primary mirror and the
//! observatory it sits in. Each query samples the aperture disk, projects the
//! samples through the mount pose and tests whether their sightlines leave the
//! dome through the slit.

pub mod disk;
pub mod kinematics;
pub mod obstruction;
pub mod projection;

pub use disk::{sample_disk, DiskPointSet};
pub use kinematics::{mount_transform, Pose};
pub use obstruction::{obstruction_ratio, slit_contains};
pub use projection::{aperture_direction, sample_aperture, transform_columns};

use nalgebra::Vector3;
use ndarray::Array2;

use crate::config::{ObservatoryConfig, DEFAULT_CONFIG};
use crate::error::ApertureError;

/// Primary aperture with optional central obstruction
#[derive(Debug, Clone, PartialEq)]
pub struct Aperture {
    radius: f64,
    secondary_radius: f64,
    sample_rate: usize,
    config: ObservatoryConfig,
}

impl Aperture {
    /// Aperture in the default observatory
    pub fn new(
        radius: f64,
        secondary_radius: f64,
        sample_rate: usize,
    ) -> Result<Self, ApertureError> {
        Self::with_config(radius, secondary_radius, sample_rate, *DEFAULT_CONFIG)
    }

    pub fn with_config(
        radius: f64,
        secondary_radius: f64,
        sample_rate: usize,
        config: ObservatoryConfig,
    ) -> Result<Self, ApertureError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ApertureError::InvalidRadius(radius));
        }
        if !(0.0..radius).contains(&secondary_radius) {
            return Err(ApertureError::InvalidSecondaryRadius {
                secondary: secondary_radius,
                radius,
            });
        }
        if sample_rate == 0 {
            return Err(ApertureError::InvalidSampleRate(sample_rate));
        }
        config.validate()?;

        Ok(Self {
            radius,
            secondary_radius,
            sample_rate,
            config,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn secondary_radius(&self) -> f64 {
        self.secondary_radius
    }

    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    pub fn config(&self) -> &ObservatoryConfig {
        &self.config
    }

    /// Unit-disk samples covering `[min_radius, 1]`
    pub fn sample_disk(&self, min_radius: f64) -> Result<DiskPointSet, ApertureError> {
        sample_disk(self.sample_rate, min_radius)
    }

    pub fn transform(&self, hour_angle: f64, declination: f64) -> Pose {
        mount_transform(hour_angle, declination, &self.config)
    }

    /// Dome-frame positions of aperture-plane samples, shape (3, M)
    pub fn sample_aperture(
        &self,
        hour_angle: f64,
        declination: f64,
        x: &[f64],
        z: &[f64],
    ) -> Result<Array2<f64>, ApertureError> {
        sample_aperture(hour_angle, declination, x, z, &self.config)
    }

    pub fn aperture_direction(&self, hour_angle: f64, declination: f64) -> Vector3<f64> {
        aperture_direction(hour_angle, declination, &self.config)
    }
}
