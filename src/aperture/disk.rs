/// Ring-based sampling of the unit aperture disk
///
/// Rings are spaced evenly in radius. Each ring carries roughly the same
/// arc-length between neighbouring points, so the areal sample density stays
/// close to uniform from the centre outwards.
use std::f64::consts::PI;

use crate::error::ApertureError;
use crate::utils::numeric::linspace;

/// Sample points on the unit disk, stored as parallel coordinate sequences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskPointSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Number of points on each ring, innermost first (the centre point is not a ring)
    pub ring_sizes: Vec<usize>,
}

impl DiskPointSet {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn has_center(&self) -> bool {
        self.len() > self.ring_sizes.iter().sum::<usize>()
    }

    /// Scale every sample radially, e.g. from the unit disk to a physical aperture
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x.iter().map(|v| v * factor).collect(),
            y: self.y.iter().map(|v| v * factor).collect(),
            ring_sizes: self.ring_sizes.clone(),
        }
    }

    fn push_ring(&mut self, radius: f64, angles: &[f64]) {
        self.x.extend(angles.iter().map(|t| radius * t.cos()));
        self.y.extend(angles.iter().map(|t| radius * t.sin()));
        self.ring_sizes.push(angles.len());
    }
}

/// Number of angular steps that matches the spacing of `k` points on the unit circle
fn ring_divisions(ring: usize, k: usize) -> Result<usize, ApertureError> {
    let arg = 1.0 / (2.0 * k as f64);
    if k == 0 || !(-1.0..=1.0).contains(&arg) {
        return Err(ApertureError::DegenerateRing { ring, k });
    }
    Ok((PI / arg.asin()).round() as usize)
}

/// Sample the annulus `[min_radius, 1]` of the unit disk with `sample_rate` rings
///
/// With `min_radius == 0` the centre point is emitted first and the rings start
/// at `1 / sample_rate`. Each ring's first and last angles are both 0 and 2π,
/// so the first point of every ring appears twice.
pub fn sample_disk(sample_rate: usize, min_radius: f64) -> Result<DiskPointSet, ApertureError> {
    if sample_rate == 0 {
        return Err(ApertureError::InvalidSampleRate(sample_rate));
    }
    if !(0.0..=1.0).contains(&min_radius) {
        return Err(ApertureError::InvalidMinRadius(min_radius));
    }

    let mut points = DiskPointSet::default();
    let (radii, mut k) = if min_radius == 0.0 {
        points.x.push(0.0);
        points.y.push(0.0);
        let dr = 1.0 / sample_rate as f64;
        (linspace(dr, 1.0, sample_rate), 1)
    } else {
        let k = (min_radius * (sample_rate + 1) as f64).ceil() as usize;
        (linspace(min_radius, 1.0, sample_rate), k)
    };

    for (ring, &radius) in radii.iter().enumerate() {
        let n = ring_divisions(ring, k)?;
        let angles = linspace(0.0, 2.0 * PI, n + 1);
        points.push_ring(radius, &angles);
        k += 1;
    }

    Ok(points)
}
