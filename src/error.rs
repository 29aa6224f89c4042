//! Error types for aperture sampling, configuration and ray casting

use thiserror::Error;

/// Errors surfaced to callers of the aperture core
#[derive(Error, Debug)]
pub enum ApertureError {
    #[error("sample rate must be at least 1, got {0}")]
    InvalidSampleRate(usize),

    #[error("minimum sampling radius must lie in [0, 1], got {0}")]
    InvalidMinRadius(f64),

    #[error("aperture radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("secondary radius must lie in [0, {radius}), got {secondary}")]
    InvalidSecondaryRadius { secondary: f64, radius: f64 },

    #[error("ring {ring} has undefined angular spacing (k = {k})")]
    DegenerateRing { ring: usize, k: usize },

    #[error("coordinate sequences differ in length: {x} x-values, {z} z-values")]
    LengthMismatch { x: usize, z: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors while loading or validating an observatory configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Failures of a single ray/dome-shell intersection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("ray direction has zero length")]
    DegenerateDirection,

    #[error("ray contains non-finite components: origin={origin:?}, direction={direction:?}")]
    NonFiniteRay {
        origin: [f64; 3],
        direction: [f64; 3],
    },
}

#[cfg(feature = "python")]
impl From<ApertureError> for pyo3::PyErr {
    fn from(err: ApertureError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<ConfigError> for pyo3::PyErr {
    fn from(err: ConfigError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
