pub mod config;
pub mod local;
pub mod processing;
pub mod utils;

#[cfg(feature = "python")]
pub mod bindings;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn rotation_detection(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<bindings::python::PyRotationDetector>()?;
    Ok(())
}
