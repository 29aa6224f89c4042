//! Observatory configuration: mount link lengths, dome geometry and site latitude
//!
//! The defaults describe the reference installation. Alternative geometries can be
//! loaded from JSON so the obstruction core can be exercised against synthetic domes.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geodetic latitude of the site in degrees
pub const SITE_LATITUDE_DEG: f64 = 52.2;

/// Pier base to right-ascension axis (metres)
pub const PIER_TO_RA_AXIS: f64 = 1.2;
/// Right-ascension axis to declination axis (metres)
pub const RA_TO_DEC_AXIS: f64 = 0.45;
/// Declination axis to optical axis (metres)
pub const DEC_TO_OPTICAL_AXIS: f64 = 0.55;

/// Inner diameter of the dome shell (metres)
pub const DOME_DIAMETER: f64 = 6.5;
/// Width of the dome slit opening (metres)
pub const DOME_SLIT_WIDTH: f64 = 1.8;
/// Height below which the shell is never open (metres)
pub const DOME_EXTENT: f64 = 1.0;

/// Half-angle subtended by the slit past the zenith, in degrees
pub const SLIT_OVERHANG_DEG: f64 = 15.0;

pub static DEFAULT_CONFIG: Lazy<ObservatoryConfig> = Lazy::new(ObservatoryConfig::default);

/// Fixed link lengths of the equatorial mount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountGeometry {
    pub pier_to_ra_axis: f64,
    pub ra_to_dec_axis: f64,
    pub dec_to_optical_axis: f64,
}

impl Default for MountGeometry {
    fn default() -> Self {
        Self {
            pier_to_ra_axis: PIER_TO_RA_AXIS,
            ra_to_dec_axis: RA_TO_DEC_AXIS,
            dec_to_optical_axis: DEC_TO_OPTICAL_AXIS,
        }
    }
}

/// Dome shell and slit dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomeGeometry {
    pub diameter: f64,
    pub slit_width: f64,
    /// Intersection points must lie above this height to count as open sky
    pub extent: f64,
    /// Centre of the dome sphere in the dome frame
    pub center: [f64; 3],
}

impl Default for DomeGeometry {
    fn default() -> Self {
        Self {
            diameter: DOME_DIAMETER,
            slit_width: DOME_SLIT_WIDTH,
            extent: DOME_EXTENT,
            center: [0.0, 0.0, 0.0],
        }
    }
}

impl DomeGeometry {
    pub fn radius(&self) -> f64 {
        0.5 * self.diameter
    }

    /// How far the slit reaches past the zenith, measured along the slit axis
    pub fn slit_overhang(&self) -> f64 {
        self.radius() * SLIT_OVERHANG_DEG.to_radians().sin()
    }
}

/// Complete observatory description consumed by the aperture core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservatoryConfig {
    pub latitude_deg: f64,
    pub mount: MountGeometry,
    pub dome: DomeGeometry,
}

impl Default for ObservatoryConfig {
    fn default() -> Self {
        Self {
            latitude_deg: SITE_LATITUDE_DEG,
            mount: MountGeometry::default(),
            dome: DomeGeometry::default(),
        }
    }
}

impl ObservatoryConfig {
    /// Parse and validate a JSON configuration. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check that every quantity is finite and physically meaningful
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mount = &self.mount;
        let dome = &self.dome;
        let values = [
            ("latitude_deg", self.latitude_deg),
            ("mount.pier_to_ra_axis", mount.pier_to_ra_axis),
            ("mount.ra_to_dec_axis", mount.ra_to_dec_axis),
            ("mount.dec_to_optical_axis", mount.dec_to_optical_axis),
            ("dome.diameter", dome.diameter),
            ("dome.slit_width", dome.slit_width),
            ("dome.extent", dome.extent),
            ("dome.center[0]", dome.center[0]),
            ("dome.center[1]", dome.center[1]),
            ("dome.center[2]", dome.center[2]),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(ConfigError::Invalid(format!(
                "latitude_deg must be within [-90, 90], got {}",
                self.latitude_deg
            )));
        }
        if dome.diameter <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dome.diameter must be positive, got {}",
                dome.diameter
            )));
        }
        if dome.slit_width <= 0.0 || dome.slit_width > dome.diameter {
            return Err(ConfigError::Invalid(format!(
                "dome.slit_width must be in (0, {}], got {}",
                dome.diameter, dome.slit_width
            )));
        }
        Ok(())
    }
}
