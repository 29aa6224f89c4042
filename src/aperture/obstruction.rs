/// Dome obstruction of the aperture
///
/// Every aperture sample casts a ray along the boresight. A ray is clear only
/// when it meets the dome shell inside the slit; misses and geometry failures
/// count as blocked.
use log::{debug, warn};
use nalgebra::{Point3, Vector3};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

use super::disk::DiskPointSet;
use super::projection::{aperture_direction, sample_aperture};
use super::Aperture;
use crate::config::DomeGeometry;
use crate::error::ApertureError;
use crate::geometry::{DomeIntersector, Ray, SphericalDome};
use crate::utils::vector_math::{column_point, rotate_about_z};

/// Whether a point on the dome shell lies inside the open slit
///
/// The point is rotated into the slit frame using the dome azimuth, offset so
/// that an azimuth of 180° leaves it unrotated.
pub fn slit_contains(point: &Point3<f64>, dome_azimuth: f64, dome: &DomeGeometry) -> bool {
    let az_corrected = (dome_azimuth - 180.0) % 360.0;
    let p = rotate_about_z(point, az_corrected);

    let half_width = 0.5 * dome.slit_width;
    let overhang = dome.slit_overhang();

    let above_extent = p.z > dome.extent;
    let within_width = -half_width < p.x && p.x < half_width;
    let within_length = -overhang < p.y && p.y < dome.radius();

    above_extent && within_width && within_length
}

fn ray_blocked(
    intersector: &dyn DomeIntersector,
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    dome_azimuth: f64,
    dome: &DomeGeometry,
) -> bool {
    let ray = Ray::new(*origin, *direction);
    match intersector.intersect(&ray) {
        Ok(Some(point)) => !slit_contains(&point, dome_azimuth, dome),
        Ok(None) => true,
        Err(e) => {
            warn!("Ray intersection failed, counting ray as blocked: {e}");
            true
        }
    }
}

/// Fraction of `true` flags; an empty set is unobstructed
pub fn obstruction_ratio(blocked: &[bool]) -> f64 {
    if blocked.is_empty() {
        return 0.0;
    }
    let count = blocked.par_iter().filter(|&&b| b).count();
    count as f64 / blocked.len() as f64
}

impl Aperture {
    fn dome(&self) -> SphericalDome {
        SphericalDome::from_geometry(&self.config.dome)
    }

    /// Test one ray against the configured spherical dome
    pub fn is_ray_blocked(
        &self,
        origin: &Point3<f64>,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> bool {
        self.is_ray_blocked_with(&self.dome(), origin, hour_angle, declination, dome_azimuth)
    }

    /// Test one ray against an arbitrary dome shell
    pub fn is_ray_blocked_with(
        &self,
        intersector: &dyn DomeIntersector,
        origin: &Point3<f64>,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> bool {
        let direction = aperture_direction(hour_angle, declination, &self.config);
        ray_blocked(intersector, origin, &direction, dome_azimuth, &self.config.dome)
    }

    /// Blocked flag for every column of a 3 x M origin matrix, in column order
    pub fn is_blocked(
        &self,
        origins: &Array2<f64>,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> Vec<bool> {
        self.is_blocked_with(&self.dome(), origins, hour_angle, declination, dome_azimuth)
    }

    pub fn is_blocked_with(
        &self,
        intersector: &dyn DomeIntersector,
        origins: &Array2<f64>,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> Vec<bool> {
        let direction = aperture_direction(hour_angle, declination, &self.config);
        let dome = &self.config.dome;
        (0..origins.ncols())
            .into_par_iter()
            .map(|i| {
                let origin = column_point(origins, i);
                ray_blocked(intersector, &origin, &direction, dome_azimuth, dome)
            })
            .collect()
    }

    /// Dome-frame ray origins for a set of disk samples
    ///
    /// Disk X is mirrored to match the dome's handedness; disk Y becomes local Z.
    fn ray_origins(
        &self,
        disk: &DiskPointSet,
        hour_angle: f64,
        declination: f64,
    ) -> Result<Array2<f64>, ApertureError> {
        let x_neg: Vec<f64> = disk.x.iter().map(|v| -v).collect();
        sample_aperture(hour_angle, declination, &x_neg, &disk.y, &self.config)
    }

    fn obstruction_of(
        &self,
        disk: &DiskPointSet,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> Result<f64, ApertureError> {
        let origins = self.ray_origins(disk, hour_angle, declination)?;
        let blocked = self.is_blocked(&origins, hour_angle, declination, dome_azimuth);
        let ratio = obstruction_ratio(&blocked);
        debug!(
            "obstruction(ha={hour_angle:.2}, dec={declination:.2}, az={dome_azimuth:.2}) = {ratio:.4} over {} rays",
            blocked.len()
        );
        Ok(ratio)
    }

    /// Fraction of the unit aperture disk blocked by the dome
    pub fn obstruction(
        &self,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> Result<f64, ApertureError> {
        let disk = self.sample_disk(0.0)?;
        self.obstruction_of(&disk, hour_angle, declination, dome_azimuth)
    }

    /// Obstruction of the physical aperture, excluding the secondary-mirror shadow
    pub fn obstruction_with_secondary(
        &self,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> Result<f64, ApertureError> {
        let disk = self
            .sample_disk(self.secondary_radius / self.radius)?
            .scaled(self.radius);
        self.obstruction_of(&disk, hour_angle, declination, dome_azimuth)
    }

    /// Obstruction for one pointing over several dome azimuths
    pub fn obstruction_map(
        &self,
        hour_angle: f64,
        declination: f64,
        dome_azimuths: &[f64],
    ) -> Result<Array1<f64>, ApertureError> {
        let disk = self.sample_disk(0.0)?;
        let origins = self.ray_origins(&disk, hour_angle, declination)?;
        let ratios: Vec<f64> = dome_azimuths
            .par_iter()
            .map(|&az| obstruction_ratio(&self.is_blocked(&origins, hour_angle, declination, az)))
            .collect();
        Ok(Array1::from(ratios))
    }

    /// Obstruction over a pointing grid at a fixed dome azimuth
    ///
    /// # Returns
    /// Array2 with shape (hour_angles.len(), declinations.len())
    pub fn obstruction_grid(
        &self,
        hour_angles: &[f64],
        declinations: &[f64],
        dome_azimuth: f64,
    ) -> Result<Array2<f64>, ApertureError> {
        let disk = self.sample_disk(0.0)?;
        let rows = hour_angles
            .par_iter()
            .map(|&ha| {
                declinations
                    .iter()
                    .map(|&dec| self.obstruction_of(&disk, ha, dec, dome_azimuth))
                    .collect::<Result<Vec<f64>, ApertureError>>()
            })
            .collect::<Result<Vec<_>, ApertureError>>()?;

        let mut grid = Array2::<f64>::zeros((hour_angles.len(), declinations.len()));
        for (i, row) in rows.iter().enumerate() {
            for (j, &ratio) in row.iter().enumerate() {
                grid[[i, j]] = ratio;
            }
        }
        Ok(grid)
    }
}
