use std::f64::consts::{LN_2, PI};

/// Gaussian exponent terms below this are treated as zero.
pub const DEFAULT_EXP_FLOOR: f64 = 1e-35;

/// Unit-area Gaussian centred at zero with full width at half maximum `fwhm`.
#[inline]
pub fn gaussian(x: f64, fwhm: f64) -> f64 {
    let sigma = fwhm / (2.0 * (2.0 * LN_2).sqrt());
    let z = x / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt())
}

/// Unit-area Lorentzian centred at zero with full width at half maximum `fwhm`.
#[inline]
pub fn lorentzian(x: f64, fwhm: f64) -> f64 {
    let gamma = 0.5 * fwhm;
    gamma / (PI * (x * x + gamma * gamma))
}

/// Unit-area mix `eta * lorentzian + (1 - eta) * gaussian` of equal FWHM.
///
/// Normalization constants are computed once, which matters when the profile is
/// evaluated for every sample of every stick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoVoigt {
    eta: f64,
    gamma: f64,
    inv_two_sigma_sq: f64,
    gaussian_norm: f64,
    exp_floor: f64,
}

impl PseudoVoigt {
    /// Precomputes the profile.
    ///
    /// # Arguments
    ///
    /// * `fwhm` - The full width at half maximum shared by both components; must be positive.
    /// * `eta` - The Lorentzian fraction, expected in `0..=1`.
    pub fn new(fwhm: f64, eta: f64) -> Self {
        let sigma = fwhm / (2.0 * (2.0 * LN_2).sqrt());
        Self {
            eta,
            gamma: 0.5 * fwhm,
            inv_two_sigma_sq: 1.0 / (2.0 * sigma * sigma),
            gaussian_norm: 1.0 / (sigma * (2.0 * PI).sqrt()),
            exp_floor: DEFAULT_EXP_FLOOR,
        }
    }

    /// Replaces [`DEFAULT_EXP_FLOOR`] as the cut-off for Gaussian exponent terms.
    pub fn with_exp_floor(mut self, exp_floor: f64) -> Self {
        self.exp_floor = exp_floor;
        self
    }

    /// The Lorentzian fraction.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// The full width at half maximum.
    pub fn fwhm(&self) -> f64 {
        2.0 * self.gamma
    }

    /// Evaluates the profile at offset `x` from its centre.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let lorentz = self.gamma / (PI * (x * x + self.gamma * self.gamma));
        let decay = (-x * x * self.inv_two_sigma_sq).exp();
        let gauss = if decay > self.exp_floor {
            self.gaussian_norm * decay
        } else {
            0.0
        };
        self.eta * lorentz + (1.0 - self.eta) * gauss
    }
}
