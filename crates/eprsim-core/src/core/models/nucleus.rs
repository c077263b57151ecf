use super::builder::NucleusBuilder;
use super::isotope;
use super::param::Param;
use serde::{Deserialize, Serialize};

/// A nuclear spin site coupled to the unpaired electron of a radical.
///
/// A single nucleus of spin `I` splits every line of its parent into `2I + 1` equally
/// intense lines spaced by `hpf`. When `eqs` is `n > 1` the entry stands for `n`
/// chemically equivalent nuclei and the splitting is the `n`-fold self-convolution of
/// that pattern (the binomial pattern for spin-1/2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nucleus {
    /// The nuclear spin quantum number `I`, a non-negative multiple of one half.
    pub spin: Param,
    /// The hyperfine coupling constant, in the field units of the sweep.
    pub hpf: Param,
    /// The number of chemically equivalent nuclei this entry represents.
    pub eqs: Param,
}

impl Nucleus {
    /// Creates a nucleus from its three parameters, in field order.
    ///
    /// # Arguments
    ///
    /// * `spin` - The nuclear spin `I`.
    /// * `hpf` - The hyperfine coupling.
    /// * `eqs` - The number of equivalent nuclei.
    pub const fn new(spin: Param, hpf: Param, eqs: Param) -> Self {
        Self { spin, hpf, eqs }
    }

    /// A nucleus whose parameters are all excluded from randomization.
    pub const fn fixed(spin: f64, hpf: f64, eqs: f64) -> Self {
        Self::new(Param::fixed(spin), Param::fixed(hpf), Param::fixed(eqs))
    }

    /// Starts a named-field construction; see [`NucleusBuilder`].
    pub fn builder() -> NucleusBuilder {
        NucleusBuilder::new()
    }

    /// Builds a nucleus from an isotope symbol such as `"14N"` or `"1H"`.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Mass number followed by the element symbol.
    /// * `hpf` - The hyperfine coupling.
    /// * `eqs` - The number of equivalent nuclei.
    ///
    /// # Return
    ///
    /// Returns `None` if the isotope is not in [`isotope::NUCLEAR_SPINS`].
    pub fn from_isotope(symbol: &str, hpf: f64, eqs: u32) -> Option<Self> {
        let spin = isotope::nuclear_spin(symbol)?;
        Some(Self::fixed(spin, hpf, f64::from(eqs)))
    }

    /// Fixed diagnostic instance: spin 1, unit coupling, a single nucleus.
    pub const fn probe() -> Self {
        Self::fixed(1.0, 1.0, 1.0)
    }

    /// Number of lines a single nucleus of this spin splits a line into.
    pub fn multiplicity(&self) -> f64 {
        2.0 * self.spin.val + 1.0
    }
}
