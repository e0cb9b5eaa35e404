use chrono::TimeDelta;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use streetglyph_core::prelude::*;

/// A route whose street geometry spells a text
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "TextRoute", frozen)]
#[derive(Clone)]
pub struct PyTextRoute {
    pub inner: TextRoute,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyTextRoute {
    #[getter]
    fn text(&self) -> &str {
        &self.inner.text
    }

    /// Route points as (lat, lng) pairs
    #[getter]
    fn coordinates(&self) -> Vec<(f64, f64)> {
        self.inner
            .coordinates
            .iter()
            .map(|point| (point.lat, point.lng))
            .collect()
    }

    #[getter]
    fn distance_km(&self) -> f64 {
        self.inner.distance_km
    }

    #[getter]
    fn segments_used(&self) -> usize {
        self.inner.segments_used
    }

    /// Time to run the route at 6 minutes per kilometer
    #[getter]
    fn estimated_duration(&self) -> TimeDelta {
        self.inner.estimated_duration(default_pace())
    }

    /// Route as a GeoJSON FeatureCollection string
    fn to_geojson(&self) -> PyResult<String> {
        self.inner.to_geojson_string().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to export route: {e}"
            ))
        })
    }

    fn __len__(&self) -> usize {
        self.inner.coordinates.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "TextRoute(text={:?}, distance_km={:.2}, segments_used={}, points={})",
            self.inner.text,
            self.inner.distance_km,
            self.inner.segments_used,
            self.inner.coordinates.len()
        )
    }
}

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::InvalidRequest(_) => PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string()),
        _ => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
            "Route synthesis failed: {err}"
        )),
    }
}

/// Synthesize a running route that spells `text` on the streets around a point
///
/// Parameters
/// ----------
/// text : str
///     Characters to draw. Digits 0-9 and the letters A, P and R are supported,
///     other characters are skipped.
/// lat : float
///     Latitude of the route center.
/// lng : float
///     Longitude of the route center.
/// min_distance_km : float
///     Lower bound of the desired route length.
/// max_distance_km : float
///     Upper bound of the desired route length.
///
/// Returns
/// -------
/// TextRoute
///     The synthesized route. Its length is best effort and may fall outside
///     the requested window.
///
/// Raises
/// ------
/// ValueError
///     If the request itself is invalid.
/// RuntimeError
///     If street data is unavailable or no stroke of the text could be matched.
///
/// Notes
/// -----
/// Street data and walking connections are fetched from the public Overpass
/// and OSRM services. The GIL is released while waiting on the network.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (text, lat, lng, min_distance_km, max_distance_km))]
pub fn synthesize_text_route(
    py: Python<'_>,
    text: String,
    lat: f64,
    lng: f64,
    min_distance_km: f64,
    max_distance_km: f64,
) -> PyResult<PyTextRoute> {
    py.detach(|| {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                    "Failed to start async runtime: {e}"
                ))
            })?;

        let route = runtime
            .block_on(streetglyph_core::pipeline::synthesize_text_route(
                &text,
                lat,
                lng,
                min_distance_km,
                max_distance_km,
            ))
            .map_err(to_py_err)?;

        Ok(PyTextRoute { inner: route })
    })
}
