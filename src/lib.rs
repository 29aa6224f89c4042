// Module declarations
pub mod aperture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod utils;

#[cfg(feature = "python")]
mod python;

// Re-export public API
pub use aperture::{Aperture, DiskPointSet, Pose};
pub use config::{DomeGeometry, MountGeometry, ObservatoryConfig, DEFAULT_CONFIG};
pub use error::{ApertureError, ConfigError, GeometryError};
pub use geometry::{DomeIntersector, Ray, SphericalDome};

#[cfg(feature = "python")]
pub use python::PyAperture;
