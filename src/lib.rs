use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::define_stub_info_gatherer;

use route::{PyTextRoute, synthesize_text_route};

pub mod route;

/// A Python module implemented in Rust.
#[pymodule]
fn streetglyph(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyTextRoute>()?;
    m.add_function(wrap_pyfunction!(synthesize_text_route, m)?)?;
    Ok(())
}

#[cfg(feature = "stubgen")]
define_stub_info_gatherer!(stub_info);
