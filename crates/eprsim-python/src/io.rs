use crate::models::PyRadical;
use crate::value_error;
use eprsim_core::core::io::{ascii, json, simpar};
use pyo3::prelude::*;

/// Reads an ASCII spectrum export and returns its `(indices, fields, intensities)` columns.
#[pyfunction]
pub fn ascii_import(content: &str) -> PyResult<(Vec<usize>, Vec<f64>, Vec<f64>)> {
    ascii::ascii_import(content).map_err(value_error)
}

/// Reads an ASCII spectrum export and returns the intensity column.
#[pyfunction]
pub fn get_from_ascii(content: &str) -> PyResult<Vec<f64>> {
    ascii::read_intensities(content).map_err(value_error)
}

/// Parses `.sim` text into `(points, sweep, radicals)`.
#[pyfunction]
pub fn get_from_sim(content: &str) -> PyResult<(usize, f64, Vec<PyRadical>)> {
    let (points, sweep, rads) = simpar::get_from_sim(content).map_err(value_error)?;
    Ok((points, sweep, rads.into_iter().map(PyRadical::from).collect()))
}

/// Re-encodes `.sim` text as a JSON parameter document.
#[pyfunction]
pub fn sim_as_json(content: &str) -> PyResult<String> {
    json::sim_as_json(content).map_err(value_error)
}

/// Re-encodes an ASCII spectrum as a JSON spectrum document.
#[pyfunction]
pub fn ascii_as_json(content: &str) -> PyResult<String> {
    json::ascii_as_json(content).map_err(value_error)
}
