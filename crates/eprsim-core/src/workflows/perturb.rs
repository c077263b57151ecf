use crate::core::models::simulator::Simulator;
use crate::core::models::spectrum::Spectrum;
use crate::engine::config::{ConfigError, SynthesisConfig};
use crate::engine::error::SimulationError;
use crate::engine::progress::{Progress, ProgressReporter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// How many perturbed simulators to draw, and from which seed.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbConfig {
    /// The number of randomized copies; at least one.
    pub draws: usize,
    /// The seed of the generator shared by all draws.
    pub seed: u64,
}

impl Default for PerturbConfig {
    fn default() -> Self {
        Self { draws: 10, seed: 0 }
    }
}

/// Builder for [`PerturbConfig`]; unset fields take their defaults.
#[derive(Default)]
pub struct PerturbConfigBuilder {
    draws: Option<usize>,
    seed: Option<u64>,
}

impl PerturbConfigBuilder {
    /// Creates a builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of copies to draw.
    pub fn draws(mut self, draws: usize) -> Self {
        self.draws = Some(draws);
        self
    }

    /// Sets the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Assembles the config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if zero draws were requested.
    pub fn build(self) -> Result<PerturbConfig, ConfigError> {
        let defaults = PerturbConfig::default();
        let draws = self.draws.unwrap_or(defaults.draws);
        if draws == 0 {
            return Err(ConfigError::InvalidValue {
                name: "draws",
                value: 0.0,
                reason: "must request at least one draw",
            });
        }
        Ok(PerturbConfig {
            draws,
            seed: self.seed.unwrap_or(defaults.seed),
        })
    }
}

/// One member of a perturbed ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    /// Zero-based position in the ensemble.
    pub index: usize,
    /// The randomized copy of the base simulator.
    pub simulator: Simulator,
    /// The synthesized spectrum of `simulator`.
    pub spectrum: Spectrum,
}

/// Draws `config.draws` randomized copies of `base` and synthesizes each one.
///
/// All copies come from a single generator seeded with `config.seed`, so the same seed
/// always yields the same ensemble. Parameters with zero variation keep their values.
#[instrument(skip_all, name = "perturb_workflow", fields(draws = config.draws, seed = config.seed))]
pub fn run(
    base: &Simulator,
    config: &PerturbConfig,
    synthesis: &SynthesisConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Draw>, SimulationError> {
    base.validate()?;
    info!("Drawing perturbed ensemble.");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let silent = ProgressReporter::new();

    reporter.phase("Perturbation", || -> Result<Vec<Draw>, SimulationError> {
        reporter.report(Progress::TaskStart {
            total_steps: config.draws as u64,
        });

        let mut draws = Vec::with_capacity(config.draws);
        for index in 0..config.draws {
            let simulator = base.perturbed(&mut rng);
            let intensities = simulator.calc_with(synthesis, &silent)?;
            let spectrum = Spectrum::from_curve(simulator.field_axis(), intensities);
            debug!(draw = index, "Synthesized perturbed spectrum.");
            draws.push(Draw {
                index,
                simulator,
                spectrum,
            });
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        Ok(draws)
    })
}
