//! Python bindings for the aperture obstruction model

use ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::aperture::Aperture;
use crate::config::{ObservatoryConfig, DEFAULT_CONFIG};

/// Python-facing wrapper around [`Aperture`]
#[pyclass(name = "Aperture")]
pub struct PyAperture {
    inner: Aperture,
}

#[pymethods]
impl PyAperture {
    #[new]
    #[pyo3(signature = (radius, secondary_radius=0.0, sample_rate=8, config_json=None))]
    fn new(
        radius: f64,
        secondary_radius: f64,
        sample_rate: usize,
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => ObservatoryConfig::from_json(json)?,
            None => *DEFAULT_CONFIG,
        };
        let inner = Aperture::with_config(radius, secondary_radius, sample_rate, config)?;
        Ok(Self { inner })
    }

    fn __repr__(&self) -> String {
        format!(
            "Aperture(radius={}, secondary_radius={}, sample_rate={})",
            self.inner.radius(),
            self.inner.secondary_radius(),
            self.inner.sample_rate()
        )
    }

    #[getter]
    fn config_json(&self) -> String {
        self.inner.config().to_json()
    }

    fn obstruction(&self, hour_angle: f64, declination: f64, dome_azimuth: f64) -> PyResult<f64> {
        Ok(self.inner.obstruction(hour_angle, declination, dome_azimuth)?)
    }

    fn obstruction_with_secondary(
        &self,
        hour_angle: f64,
        declination: f64,
        dome_azimuth: f64,
    ) -> PyResult<f64> {
        Ok(self
            .inner
            .obstruction_with_secondary(hour_angle, declination, dome_azimuth)?)
    }

    fn obstruction_map<'py>(
        &self,
        py: Python<'py>,
        hour_angle: f64,
        declination: f64,
        dome_azimuths: Vec<f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let map = self
            .inner
            .obstruction_map(hour_angle, declination, &dome_azimuths)?;
        Ok(map.into_pyarray(py))
    }

    #[pyo3(signature = (min_radius=0.0))]
    fn sample_disk<'py>(
        &self,
        py: Python<'py>,
        min_radius: f64,
    ) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
        let points = self.inner.sample_disk(min_radius)?;
        Ok((points.x.into_pyarray(py), points.y.into_pyarray(py)))
    }

    fn sample_aperture<'py>(
        &self,
        py: Python<'py>,
        hour_angle: f64,
        declination: f64,
        x: Vec<f64>,
        z: Vec<f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let points = self.inner.sample_aperture(hour_angle, declination, &x, &z)?;
        Ok(points.into_pyarray(py))
    }

    fn aperture_direction(&self, hour_angle: f64, declination: f64) -> [f64; 3] {
        let d = self.inner.aperture_direction(hour_angle, declination);
        [d.x, d.y, d.z]
    }

    /// 4x4 homogeneous matrix of the mount pose
    fn transform<'py>(
        &self,
        py: Python<'py>,
        hour_angle: f64,
        declination: f64,
    ) -> Bound<'py, PyArray2<f64>> {
        let m = self.inner.transform(hour_angle, declination).to_homogeneous();
        Array2::from_shape_fn((4, 4), |(i, j)| m[(i, j)]).into_pyarray(py)
    }
}

/// JSON for the built-in observatory configuration
#[pyfunction]
fn default_config_json() -> String {
    DEFAULT_CONFIG.to_json()
}

#[pymodule]
fn _dome_obstruction(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAperture>()?;
    m.add_function(wrap_pyfunction!(default_config_json, m)?)?;
    Ok(())
}
