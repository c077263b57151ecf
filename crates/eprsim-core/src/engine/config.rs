use crate::core::lineshape::DEFAULT_EXP_FLOOR;
use thiserror::Error;

/// Errors raised when a config holds unusable values.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    /// A knob holds a value the engine cannot work with.
    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Numerical knobs of the synthesis engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    /// Linewidths below this are clamped to it, with a warning.
    pub min_linewidth: f64,
    /// Sticks closer than this (field units) are merged into one line.
    pub merge_tolerance: f64,
    /// Gaussian exponent terms below this are treated as zero.
    pub exp_floor: f64,
    /// Upper bound on the number of lines a single radical may expand to.
    pub max_lines: usize,
    /// Highest derivative order `dh1` may select.
    pub max_derivative_order: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            min_linewidth: 1e-6,
            merge_tolerance: 1e-9,
            exp_floor: DEFAULT_EXP_FLOOR,
            max_lines: 1 << 22,
            max_derivative_order: 4,
        }
    }
}

impl SynthesisConfig {
    /// Checks every knob against its admissible range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first knob out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_linewidth.is_finite() && self.min_linewidth > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "min_linewidth",
                value: self.min_linewidth,
                reason: "must be positive and finite",
            });
        }
        if !(self.merge_tolerance.is_finite() && self.merge_tolerance >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "merge_tolerance",
                value: self.merge_tolerance,
                reason: "must be non-negative and finite",
            });
        }
        if !(self.exp_floor.is_finite() && self.exp_floor >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "exp_floor",
                value: self.exp_floor,
                reason: "must be non-negative and finite",
            });
        }
        if self.max_lines == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_lines",
                value: 0.0,
                reason: "must allow at least one line",
            });
        }
        Ok(())
    }
}

/// Builder for [`SynthesisConfig`]; unset fields take their defaults.
#[derive(Default)]
pub struct SynthesisConfigBuilder {
    min_linewidth: Option<f64>,
    merge_tolerance: Option<f64>,
    exp_floor: Option<f64>,
    max_lines: Option<usize>,
    max_derivative_order: Option<u32>,
}

impl SynthesisConfigBuilder {
    /// Creates a builder with every knob at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides [`SynthesisConfig::min_linewidth`].
    pub fn min_linewidth(mut self, width: f64) -> Self {
        self.min_linewidth = Some(width);
        self
    }
    /// Overrides [`SynthesisConfig::merge_tolerance`].
    pub fn merge_tolerance(mut self, tolerance: f64) -> Self {
        self.merge_tolerance = Some(tolerance);
        self
    }
    /// Overrides [`SynthesisConfig::exp_floor`].
    pub fn exp_floor(mut self, floor: f64) -> Self {
        self.exp_floor = Some(floor);
        self
    }
    /// Overrides [`SynthesisConfig::max_lines`].
    pub fn max_lines(mut self, lines: usize) -> Self {
        self.max_lines = Some(lines);
        self
    }
    /// Overrides [`SynthesisConfig::max_derivative_order`].
    pub fn max_derivative_order(mut self, order: u32) -> Self {
        self.max_derivative_order = Some(order);
        self
    }

    /// Assembles the config and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any knob is out of range.
    pub fn build(self) -> Result<SynthesisConfig, ConfigError> {
        let defaults = SynthesisConfig::default();
        let config = SynthesisConfig {
            min_linewidth: self.min_linewidth.unwrap_or(defaults.min_linewidth),
            merge_tolerance: self.merge_tolerance.unwrap_or(defaults.merge_tolerance),
            exp_floor: self.exp_floor.unwrap_or(defaults.exp_floor),
            max_lines: self.max_lines.unwrap_or(defaults.max_lines),
            max_derivative_order: self
                .max_derivative_order
                .unwrap_or(defaults.max_derivative_order),
        };
        config.validate()?;
        Ok(config)
    }
}
