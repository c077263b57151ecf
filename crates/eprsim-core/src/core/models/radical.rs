use super::builder::RadicalBuilder;
use super::nucleus::Nucleus;
use super::param::Param;
use serde::{Deserialize, Serialize};

/// A paramagnetic species contributing one multiplet to the simulated spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radical {
    /// The intrinsic linewidth (full width at half maximum), in field units.
    pub lwa: Param,
    /// The Lorentzian fraction of the pseudo-Voigt lineshape, conceptually in `0..=1`.
    pub lrtz: Param,
    /// The relative abundance across the radicals of a simulator; zero contributes nothing.
    pub amount: Param,
    /// The presentation: its rounded value is the number of derivatives applied.
    pub dh1: Param,
    /// The coupled nuclei, in enumeration order.
    #[serde(default)]
    pub nucs: Vec<Nucleus>,
}

impl Radical {
    /// Creates a radical from its parameters, in field order.
    ///
    /// # Arguments
    ///
    /// * `lwa` - The linewidth.
    /// * `lrtz` - The Lorentzian fraction.
    /// * `amount` - The relative abundance.
    /// * `dh1` - The presentation control.
    /// * `nucs` - The coupled nuclei.
    pub fn new(lwa: Param, lrtz: Param, amount: Param, dh1: Param, nucs: Vec<Nucleus>) -> Self {
        Self {
            lwa,
            lrtz,
            amount,
            dh1,
            nucs,
        }
    }

    /// A radical without nuclei whose parameters are all excluded from randomization.
    pub fn fixed(lwa: f64, lrtz: f64, amount: f64, dh1: f64) -> Self {
        Self::new(
            Param::fixed(lwa),
            Param::fixed(lrtz),
            Param::fixed(amount),
            Param::fixed(dh1),
            Vec::new(),
        )
    }

    /// Starts a named-field construction; see [`RadicalBuilder`].
    pub fn builder() -> RadicalBuilder {
        RadicalBuilder::new()
    }

    /// A bare unpaired electron: a single Lorentzian absorption line of width 0.5.
    pub fn electron() -> Self {
        Self::fixed(0.5, 1.0, 1.0, 0.0)
    }

    /// Fixed diagnostic instance, not a physical species.
    ///
    /// Linewidth 1.0, equal Gaussian/Lorentzian mix, unit amount, absorption
    /// presentation, and one spin-1 nucleus with a coupling of 14.0 (nitroxide-like
    /// triplet).
    pub fn probe() -> Self {
        let mut radical = Self::fixed(1.0, 0.5, 1.0, 0.0);
        radical.push_nuc(Nucleus::fixed(1.0, 14.0, 1.0));
        radical
    }

    /// Returns the coupled nuclei in enumeration order.
    pub fn nucs(&self) -> &[Nucleus] {
        &self.nucs
    }

    /// Appends a nucleus after the existing ones.
    ///
    /// # Arguments
    ///
    /// * `nucleus` - The nucleus to couple to this radical.
    pub fn push_nuc(&mut self, nucleus: Nucleus) {
        self.nucs.push(nucleus);
    }

    /// Removes the most recently appended nucleus.
    ///
    /// # Return
    ///
    /// The removed nucleus, or `None` when the radical has no nuclei.
    pub fn pop_nuc(&mut self) -> Option<Nucleus> {
        self.nucs.pop()
    }
}
