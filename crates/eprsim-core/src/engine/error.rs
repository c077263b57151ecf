use super::config::ConfigError;
use thiserror::Error;

/// Reasons a simulator cannot be synthesized.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Sweep must be a positive, finite field range (got {0})")]
    InvalidSweep(f64),

    #[error("Number of points must be a positive integer (got {0})")]
    InvalidPoints(f64),

    #[error("Invalid value {value} for '{field}' of radical {radical}: {reason}")]
    InvalidParameter {
        radical: usize,
        field: String,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "Nucleus {nucleus} of radical {radical} has spin {spin}, which is not a non-negative multiple of 1/2"
    )]
    InvalidSpin {
        radical: usize,
        nucleus: usize,
        spin: f64,
    },

    #[error(
        "Nucleus {nucleus} of radical {radical} stands for {eqs} equivalent nuclei; expected a non-negative integer"
    )]
    InvalidEquivalence {
        radical: usize,
        nucleus: usize,
        eqs: f64,
    },

    #[error("Radical {radical} expands to more than {limit} lines")]
    TooManyLines { radical: usize, limit: usize },

    #[error("Radical {radical} requests derivative order {order}, above the limit of {limit}")]
    DerivativeOrderTooHigh {
        radical: usize,
        order: f64,
        limit: u32,
    },

    #[error("Invalid synthesis configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
