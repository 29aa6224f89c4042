/// Ray/dome-shell intersection
///
/// The dome shell is modelled as a sphere. Rays start inside the dome at an
/// aperture sample and travel along the (unnormalised) boresight direction.
use nalgebra::{Point3, Vector3};

use crate::config::DomeGeometry;
use crate::error::GeometryError;

/// Intersections closer than this (in ray-parameter units) are treated as the origin itself
const MIN_RAY_PARAMETER: f64 = 1e-12;

/// Half-line starting at `origin` and travelling along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Point reached after travelling `t` direction-lengths along the ray
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    fn check(&self) -> Result<(), GeometryError> {
        let finite = self.origin.iter().all(|c| c.is_finite())
            && self.direction.iter().all(|c| c.is_finite());
        if !finite {
            return Err(GeometryError::NonFiniteRay {
                origin: [self.origin.x, self.origin.y, self.origin.z],
                direction: [self.direction.x, self.direction.y, self.direction.z],
            });
        }
        if self.direction.norm_squared() == 0.0 {
            return Err(GeometryError::DegenerateDirection);
        }
        Ok(())
    }
}

/// Something a ray can hit
///
/// Implementations report the first point where the ray meets the shell,
/// `Ok(None)` when it never does, and `Err` when the ray itself is unusable.
pub trait DomeIntersector: Send + Sync {
    fn intersect(&self, ray: &Ray) -> Result<Option<Point3<f64>>, GeometryError>;
}

/// Spherical dome shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalDome {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl SphericalDome {
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn from_geometry(dome: &DomeGeometry) -> Self {
        let [x, y, z] = dome.center;
        Self::new(Point3::new(x, y, z), dome.radius())
    }
}

impl DomeIntersector for SphericalDome {
    fn intersect(&self, ray: &Ray) -> Result<Option<Point3<f64>>, GeometryError> {
        ray.check()?;

        // |o + t d - c|^2 = r^2, solved in the unnormalised parameter t
        let oc = ray.origin - self.center;
        let a = ray.direction.norm_squared();
        let half_b = ray.direction.dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return Ok(None);
        }

        let sqrt_disc = discriminant.sqrt();
        let near = (-half_b - sqrt_disc) / a;
        let far = (-half_b + sqrt_disc) / a;

        let t = if near > MIN_RAY_PARAMETER {
            near
        } else if far > MIN_RAY_PARAMETER {
            far
        } else {
            return Ok(None);
        };

        Ok(Some(ray.point_at(t)))
    }
}
