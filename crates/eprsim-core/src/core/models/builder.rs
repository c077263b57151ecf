use super::nucleus::Nucleus;
use super::param::Param;
use super::radical::Radical;
use super::simulator::Simulator;
use thiserror::Error;

/// Errors returned by the model builders.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BuildError {
    /// A required field was never set.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Named-field construction of a [`Nucleus`]. `eqs` defaults to a single nucleus.
#[derive(Debug, Default, Clone)]
pub struct NucleusBuilder {
    spin: Option<Param>,
    hpf: Option<Param>,
    eqs: Option<Param>,
}

impl NucleusBuilder {
    /// Creates a builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nuclear spin quantum number.
    pub fn spin(mut self, spin: impl Into<Param>) -> Self {
        self.spin = Some(spin.into());
        self
    }
    /// Sets the hyperfine coupling, in field units.
    pub fn hpf(mut self, hpf: impl Into<Param>) -> Self {
        self.hpf = Some(hpf.into());
        self
    }
    /// Sets the number of magnetically equivalent nuclei.
    pub fn eqs(mut self, eqs: impl Into<Param>) -> Self {
        self.eqs = Some(eqs.into());
        self
    }

    /// Finishes the construction.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] if `spin` or `hpf` was not set.
    pub fn build(self) -> Result<Nucleus, BuildError> {
        Ok(Nucleus {
            spin: self.spin.ok_or(BuildError::MissingField("spin"))?,
            hpf: self.hpf.ok_or(BuildError::MissingField("hpf"))?,
            eqs: self.eqs.unwrap_or(Param::fixed(1.0)),
        })
    }
}

/// Named-field construction of a [`Radical`].
///
/// `lwa`, `lrtz` and `amount` are required; `dh1` defaults to absorption presentation
/// and the nucleus list to empty.
#[derive(Debug, Default, Clone)]
pub struct RadicalBuilder {
    lwa: Option<Param>,
    lrtz: Option<Param>,
    amount: Option<Param>,
    dh1: Option<Param>,
    nucs: Vec<Nucleus>,
}

impl RadicalBuilder {
    /// Creates a builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the linewidth.
    pub fn lwa(mut self, lwa: impl Into<Param>) -> Self {
        self.lwa = Some(lwa.into());
        self
    }
    /// Sets the Lorentzian fraction.
    pub fn lrtz(mut self, lrtz: impl Into<Param>) -> Self {
        self.lrtz = Some(lrtz.into());
        self
    }
    /// Sets the relative abundance.
    pub fn amount(mut self, amount: impl Into<Param>) -> Self {
        self.amount = Some(amount.into());
        self
    }
    /// Sets the presentation control.
    pub fn dh1(mut self, dh1: impl Into<Param>) -> Self {
        self.dh1 = Some(dh1.into());
        self
    }
    /// Appends one nucleus.
    pub fn nucleus(mut self, nucleus: Nucleus) -> Self {
        self.nucs.push(nucleus);
        self
    }
    /// Appends every nucleus of `nucs`, in order.
    pub fn nucs(mut self, nucs: impl IntoIterator<Item = Nucleus>) -> Self {
        self.nucs.extend(nucs);
        self
    }

    /// Finishes the construction.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] if `lwa`, `lrtz` or `amount` was not set.
    pub fn build(self) -> Result<Radical, BuildError> {
        Ok(Radical {
            lwa: self.lwa.ok_or(BuildError::MissingField("lwa"))?,
            lrtz: self.lrtz.ok_or(BuildError::MissingField("lrtz"))?,
            amount: self.amount.ok_or(BuildError::MissingField("amount"))?,
            dh1: self.dh1.unwrap_or_default(),
            nucs: self.nucs,
        })
    }
}

/// Named-field construction of a [`Simulator`]. `sweep` and `points` are required.
#[derive(Debug, Default, Clone)]
pub struct SimulatorBuilder {
    sweep: Option<f64>,
    points: Option<usize>,
    rads: Vec<Radical>,
}

impl SimulatorBuilder {
    /// Creates a builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total field range.
    pub fn sweep(mut self, sweep: f64) -> Self {
        self.sweep = Some(sweep);
        self
    }
    /// Sets the number of samples.
    pub fn points(mut self, points: usize) -> Self {
        self.points = Some(points);
        self
    }
    /// Appends one radical.
    pub fn radical(mut self, radical: Radical) -> Self {
        self.rads.push(radical);
        self
    }
    /// Appends every radical of `rads`, in order.
    pub fn rads(mut self, rads: impl IntoIterator<Item = Radical>) -> Self {
        self.rads.extend(rads);
        self
    }

    /// Finishes the construction.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] if `sweep` or `points` was not set.
    pub fn build(self) -> Result<Simulator, BuildError> {
        Ok(Simulator {
            sweep: self.sweep.ok_or(BuildError::MissingField("sweep"))?,
            points: self.points.ok_or(BuildError::MissingField("points"))?,
            rads: self.rads,
        })
    }
}
