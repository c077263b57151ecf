use super::{load_parameters, write_spectrum};
use crate::cli::SimulateArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use eprsim::core::models::simulator::Simulator;
use eprsim::engine::progress::ProgressReporter;
use eprsim::workflows;
use tracing::info;

/// Synthesizes one spectrum and writes it to `args.output`.
pub fn run(args: SimulateArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialRunConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_simulate(&args)?;

    info!("Loading parameters from {:?}", &args.input);
    let mut simulator = Simulator::from(load_parameters(&args.input)?);
    if let Some(points) = args.points {
        simulator.points = points;
    }
    if let Some(sweep) = args.sweep {
        simulator.sweep = sweep;
    }

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let spectrum = workflows::simulate::run(&simulator, &settings.synthesis, &reporter)?;

    info!("Writing spectrum to {:?}", &args.output);
    write_spectrum(&spectrum, &args.output, settings.format)?;
    println!(
        "✓ Spectrum with {} points written to: {}",
        spectrum.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::CliError;
    use clap::Parser;
    use eprsim::core::io::{delimited::CsvSpectrumFile, traits::DataFile};
    use eprsim::engine::error::SimulationError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const NITROXIDE_SIM: &str = "1\n512\n60\n1\n1\n0.7\n30\n1\n3\n0.5\n4.1\n";

    fn args(input: &Path, output: &Path, extra: &[&str]) -> SimulateArgs {
        let mut argv = vec![
            "eprsim".to_string(),
            "simulate".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(argv).command {
            Commands::Simulate(args) => args,
            _ => panic!("Expected 'simulate' subcommand"),
        }
    }

    #[test]
    fn writes_spectrum_with_overridden_points() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("nitroxide.sim");
        let output = dir.path().join("nitroxide.csv");
        fs::write(&input, NITROXIDE_SIM).unwrap();

        run(args(&input, &output, &["--points", "128"]), false).unwrap();

        let spectrum = CsvSpectrumFile::read_from_path(&output).unwrap();
        assert_eq!(spectrum.len(), 128);
        assert_eq!(spectrum.fields.first(), Some(&0.0));
        assert!((spectrum.fields[127] - 60.0).abs() < 1e-9);
        assert!(spectrum.intensities.iter().any(|v| *v != 0.0));
    }

    #[test]
    fn invalid_override_is_a_simulation_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("nitroxide.sim");
        fs::write(&input, NITROXIDE_SIM).unwrap();

        let result = run(
            args(&input, &dir.path().join("out.txt"), &["--sweep=0"]),
            false,
        );
        assert!(matches!(
            result,
            Err(CliError::Simulation(SimulationError::InvalidSweep(_)))
        ));
    }
}
