use crate::core::models::simulator::Simulator;
use crate::core::models::spectrum::Spectrum;
use crate::engine::config::SynthesisConfig;
use crate::engine::error::SimulationError;
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

/// Synthesizes the spectrum of `simulator` together with its field axis.
#[instrument(skip_all, name = "simulate_workflow")]
pub fn run(
    simulator: &Simulator,
    config: &SynthesisConfig,
    reporter: &ProgressReporter,
) -> Result<Spectrum, SimulationError> {
    info!(
        radicals = simulator.rads.len(),
        points = simulator.points,
        sweep = simulator.sweep,
        "Simulating spectrum."
    );
    let intensities = simulator.calc_with(config, reporter)?;
    Ok(Spectrum::from_curve(simulator.field_axis(), intensities))
}
