use super::{load_parameters, write_spectrum};
use crate::cli::{OutputFormat, PerturbArgs};
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use eprsim::core::io::{json::JsonParamsFile, simpar::SimulationParameters, traits::DataFile};
use eprsim::core::models::simulator::Simulator;
use eprsim::engine::progress::ProgressReporter;
use eprsim::workflows::{self, perturb::Draw};
use std::path::{Path, PathBuf};
use tracing::info;

/// Draws the ensemble and writes one spectrum file per draw.
pub fn run(args: PerturbArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialRunConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_perturb(&args)?;

    info!("Loading base parameters from {:?}", &args.input);
    let base = Simulator::from(load_parameters(&args.input)?);

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let draws = workflows::perturb::run(&base, &settings.perturb, &settings.synthesis, &reporter)?;

    std::fs::create_dir_all(&args.output)?;
    for draw in &draws {
        write_draw(draw, &args.output, settings.format)?;
    }

    println!(
        "✓ {} perturbed draw(s) (seed {}) written to: {}",
        draws.len(),
        settings.perturb.seed,
        args.output.display()
    );
    Ok(())
}

fn draw_stem(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("draw-{:03}", index + 1))
}

fn write_draw(draw: &Draw, dir: &Path, format: OutputFormat) -> Result<()> {
    let stem = draw_stem(dir, draw.index);

    let params_path = stem.with_extension("params.json");
    info!("Writing draw {} parameters to {:?}", draw.index + 1, &params_path);
    JsonParamsFile::write_to_path(&SimulationParameters::from(&draw.simulator), &params_path)
        .map_err(|e| CliError::file(&params_path, e))?;

    let spectrum_path = stem.with_extension(format.extension());
    write_spectrum(&draw.spectrum, &spectrum_path, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use eprsim::core::io::delimited::CsvSpectrumFile;
    use eprsim::core::models::param::Param;
    use eprsim::core::models::radical::Radical;
    use tempfile::tempdir;

    fn args(input: &Path, output: &Path, extra: &[&str]) -> PerturbArgs {
        let mut argv = vec![
            "eprsim".to_string(),
            "perturb".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(argv).command {
            Commands::Perturb(args) => args,
            _ => panic!("Expected 'perturb' subcommand"),
        }
    }

    fn write_base(dir: &Path) -> PathBuf {
        let mut radical = Radical::probe();
        radical.lwa = Param::new(1.0, 0.25);
        radical.nucs[0].hpf = Param::new(14.0, 1.0);
        let path = dir.join("base.json");
        JsonParamsFile::write_to_path(&SimulationParameters::new(128, 60.0, vec![radical]), &path)
            .unwrap();
        path
    }

    #[test]
    fn draw_files_are_numbered_from_one() {
        let stem = draw_stem(Path::new("out"), 0);
        assert_eq!(stem.with_extension("params.json"), Path::new("out/draw-001.params.json"));
        assert_eq!(stem.with_extension("csv"), Path::new("out/draw-001.csv"));
    }

    #[test]
    fn writes_parameters_and_spectrum_per_draw() {
        let dir = tempdir().unwrap();
        let input = write_base(dir.path());
        let output = dir.path().join("ensemble");

        run(args(&input, &output, &["-n", "3", "--seed", "5", "-f", "csv"]), false).unwrap();

        for n in 1..=3 {
            let params =
                JsonParamsFile::read_from_path(output.join(format!("draw-{n:03}.params.json")))
                    .unwrap();
            let lwa = params.rads[0].lwa.val;
            assert!((0.75..=1.25).contains(&lwa));

            let spectrum =
                CsvSpectrumFile::read_from_path(output.join(format!("draw-{n:03}.csv"))).unwrap();
            assert_eq!(spectrum.len(), 128);
        }
        assert!(!output.join("draw-004.csv").exists());
    }

    #[test]
    fn equal_seeds_write_equal_ensembles() {
        let dir = tempdir().unwrap();
        let input = write_base(dir.path());
        let (a, b) = (dir.path().join("a"), dir.path().join("b"));

        run(args(&input, &a, &["-n", "2", "--seed", "42"]), false).unwrap();
        run(args(&input, &b, &["-n", "2", "--seed", "42"]), false).unwrap();

        for name in ["draw-001.params.json", "draw-002.txt"] {
            let left = std::fs::read_to_string(a.join(name)).unwrap();
            let right = std::fs::read_to_string(b.join(name)).unwrap();
            assert_eq!(left, right, "{name}");
        }
    }
}
