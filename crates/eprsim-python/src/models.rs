use crate::value_error;
use eprsim_core::core::models::{
    nucleus::Nucleus, param::Param, radical::Radical, simulator::Simulator,
};
use eprsim_core::engine::validation::points_from_float;
use pyo3::prelude::*;

/// A quantity with a value and a variation window.
#[pyclass(name = "Param", module = "eprsim")]
#[derive(Clone, Copy)]
pub struct PyParam {
    inner: Param,
}

impl From<Param> for PyParam {
    fn from(inner: Param) -> Self {
        Self { inner }
    }
}

impl From<PyParam> for Param {
    fn from(param: PyParam) -> Self {
        param.inner
    }
}

#[pymethods]
impl PyParam {
    #[new]
    #[pyo3(signature = (val, var = 0.0))]
    fn new(val: f64, var: f64) -> Self {
        Param::new(val, var).into()
    }

    #[getter]
    fn val(&self) -> f64 {
        self.inner.val
    }

    #[setter]
    fn set_val(&mut self, value: f64) {
        self.inner.val = value;
    }

    #[getter]
    fn var(&self) -> f64 {
        self.inner.var
    }

    #[setter]
    fn set_var(&mut self, value: f64) {
        self.inner.var = value;
    }

    /// Redraws `val` uniformly within `val ± var`.
    fn randomize(&mut self) {
        self.inner.randomize();
    }

    fn __repr__(&self) -> String {
        format!("Param(val={}, var={})", self.inner.val, self.inner.var)
    }
}

/// A set of equivalent nuclei coupled to a radical.
#[pyclass(name = "Nucleus", module = "eprsim")]
#[derive(Clone, Copy)]
pub struct PyNucleus {
    inner: Nucleus,
}

impl From<Nucleus> for PyNucleus {
    fn from(inner: Nucleus) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyNucleus {
    #[new]
    fn new(spin: PyParam, hpf: PyParam, eqs: PyParam) -> Self {
        Nucleus::new(spin.into(), hpf.into(), eqs.into()).into()
    }

    #[staticmethod]
    fn probe() -> Self {
        Nucleus::probe().into()
    }

    /// Fixed-parameter nucleus for an isotope symbol such as `"14N"` or `"1H"`.
    #[staticmethod]
    #[pyo3(signature = (symbol, hpf, eqs = 1))]
    fn from_isotope(symbol: &str, hpf: f64, eqs: u32) -> PyResult<Self> {
        Nucleus::from_isotope(symbol, hpf, eqs)
            .map(Self::from)
            .ok_or_else(|| value_error(format!("Unknown isotope: {symbol}")))
    }

    #[getter]
    fn spin(&self) -> PyParam {
        self.inner.spin.into()
    }

    #[setter]
    fn set_spin(&mut self, value: PyParam) {
        self.inner.spin = value.into();
    }

    #[getter]
    fn hpf(&self) -> PyParam {
        self.inner.hpf.into()
    }

    #[setter]
    fn set_hpf(&mut self, value: PyParam) {
        self.inner.hpf = value.into();
    }

    #[getter]
    fn eqs(&self) -> PyParam {
        self.inner.eqs.into()
    }

    #[setter]
    fn set_eqs(&mut self, value: PyParam) {
        self.inner.eqs = value.into();
    }

    fn randomize(&mut self) {
        self.inner.randomize();
    }

    fn __repr__(&self) -> String {
        format!(
            "Nucleus(spin={}, hpf={}, eqs={})",
            self.inner.spin.val, self.inner.hpf.val, self.inner.eqs.val
        )
    }
}

/// One paramagnetic species and its coupled nuclei.
#[pyclass(name = "Radical", module = "eprsim")]
#[derive(Clone)]
pub struct PyRadical {
    inner: Radical,
}

impl From<Radical> for PyRadical {
    fn from(inner: Radical) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyRadical {
    #[new]
    #[pyo3(signature = (lwa, lrtz, amount, dh1, nucs = Vec::new()))]
    fn new(lwa: PyParam, lrtz: PyParam, amount: PyParam, dh1: PyParam, nucs: Vec<PyNucleus>) -> Self {
        let nucs = nucs.into_iter().map(|n| n.inner).collect();
        Radical::new(lwa.into(), lrtz.into(), amount.into(), dh1.into(), nucs).into()
    }

    #[staticmethod]
    fn probe() -> Self {
        Radical::probe().into()
    }

    #[getter]
    fn lwa(&self) -> PyParam {
        self.inner.lwa.into()
    }

    #[setter]
    fn set_lwa(&mut self, value: PyParam) {
        self.inner.lwa = value.into();
    }

    #[getter]
    fn lrtz(&self) -> PyParam {
        self.inner.lrtz.into()
    }

    #[setter]
    fn set_lrtz(&mut self, value: PyParam) {
        self.inner.lrtz = value.into();
    }

    #[getter]
    fn amount(&self) -> PyParam {
        self.inner.amount.into()
    }

    #[setter]
    fn set_amount(&mut self, value: PyParam) {
        self.inner.amount = value.into();
    }

    #[getter]
    fn dh1(&self) -> PyParam {
        self.inner.dh1.into()
    }

    #[setter]
    fn set_dh1(&mut self, value: PyParam) {
        self.inner.dh1 = value.into();
    }

    /// A copy of the coupled nuclei; edit them through `push_nuc`/`pop_nuc`.
    #[getter]
    fn nucs(&self) -> Vec<PyNucleus> {
        self.inner.nucs.iter().copied().map(PyNucleus::from).collect()
    }

    fn push_nuc(&mut self, nucleus: PyNucleus) {
        self.inner.push_nuc(nucleus.inner);
    }

    fn pop_nuc(&mut self) -> Option<PyNucleus> {
        self.inner.pop_nuc().map(PyNucleus::from)
    }

    fn randomize(&mut self) {
        self.inner.randomize();
    }

    fn __repr__(&self) -> String {
        format!(
            "Radical(lwa={}, lrtz={}, amount={}, dh1={}, nucs={})",
            self.inner.lwa.val,
            self.inner.lrtz.val,
            self.inner.amount.val,
            self.inner.dh1.val,
            self.inner.nucs.len()
        )
    }
}

/// A field sweep, a sample count and the radicals to synthesize.
#[pyclass(name = "Simulator", module = "eprsim")]
#[derive(Clone)]
pub struct PySimulator {
    inner: Simulator,
}

#[pymethods]
impl PySimulator {
    /// `points` may be given as a float such as `1024.0`; it is truncated and, like the
    /// rest of the simulator, validated. Invalid input raises `ValueError`.
    #[new]
    #[pyo3(signature = (sweep, points, rads = Vec::new()))]
    fn new(sweep: f64, points: f64, rads: Vec<PyRadical>) -> PyResult<Self> {
        let rads = rads.into_iter().map(|r| r.inner).collect();
        let inner = Simulator::from_float_points(sweep, points, rads).map_err(value_error)?;
        Ok(Self { inner })
    }

    #[getter]
    fn sweep(&self) -> f64 {
        self.inner.sweep
    }

    #[setter]
    fn set_sweep(&mut self, value: f64) {
        self.inner.sweep = value;
    }

    #[getter]
    fn points(&self) -> usize {
        self.inner.points
    }

    #[setter]
    fn set_points(&mut self, value: f64) -> PyResult<()> {
        self.inner.points = points_from_float(value).map_err(value_error)?;
        Ok(())
    }

    #[getter]
    fn rads(&self) -> Vec<PyRadical> {
        self.inner.rads.iter().cloned().map(PyRadical::from).collect()
    }

    fn push_rad(&mut self, radical: PyRadical) {
        self.inner.push_rad(radical.inner);
    }

    fn pop_rad(&mut self) -> Option<PyRadical> {
        self.inner.pop_rad().map(PyRadical::from)
    }

    fn randomize(&mut self) {
        self.inner.randomize();
    }

    /// The field offset of every sample, from `0.0` to `sweep`.
    fn field_axis(&self) -> Vec<f64> {
        self.inner.field_axis()
    }

    /// Synthesizes the spectrum as `points` intensities. The GIL is released meanwhile.
    fn calc(&self, py: Python<'_>) -> PyResult<Vec<f64>> {
        let simulator = self.inner.clone();
        py.allow_threads(move || simulator.calc()).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Simulator(sweep={}, points={}, rads={})",
            self.inner.sweep,
            self.inner.points,
            self.inner.rads.len()
        )
    }
}
