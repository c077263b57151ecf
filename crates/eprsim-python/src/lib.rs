//! Python bindings for eprsim.
//!
//! Exposes the four model types as Python classes that can be built either positionally
//! or by keyword, `Simulator.calc()` as the numeric entry point, and the text importers
//! used to compare simulations with experimental data. Every error raised by the core
//! library surfaces as `ValueError`.

mod io;
mod models;

use models::{PyNucleus, PyParam, PyRadical, PySimulator};
use pyo3::prelude::*;

#[pymodule]
fn eprsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyParam>()?;
    m.add_class::<PyNucleus>()?;
    m.add_class::<PyRadical>()?;
    m.add_class::<PySimulator>()?;

    m.add_function(wrap_pyfunction!(io::ascii_import, m)?)?;
    m.add_function(wrap_pyfunction!(io::get_from_ascii, m)?)?;
    m.add_function(wrap_pyfunction!(io::get_from_sim, m)?)?;
    m.add_function(wrap_pyfunction!(io::sim_as_json, m)?)?;
    m.add_function(wrap_pyfunction!(io::ascii_as_json, m)?)?;
    Ok(())
}

pub(crate) fn value_error(err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}
