use crate::cli::{OutputFormat, PerturbArgs, SimulateArgs};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use eprsim::engine::config::{SynthesisConfig, SynthesisConfigBuilder};
use eprsim::workflows::perturb::{PerturbConfig, PerturbConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSynthesisConfig {
    min_linewidth: Option<f64>,
    merge_tolerance: Option<f64>,
    exp_floor: Option<f64>,
    max_lines: Option<usize>,
    max_derivative_order: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    format: Option<OutputFormat>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPerturbConfig {
    draws: Option<usize>,
    seed: Option<u64>,
}

/// The optional TOML configuration file, before CLI arguments are merged in.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    synthesis: Option<PartialSynthesisConfig>,
    output: Option<PartialOutputConfig>,
    perturb: Option<PartialPerturbConfig>,
}

/// Fully resolved settings of the `simulate` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateSettings {
    /// Engine knobs after file values and overrides are applied.
    pub synthesis: SynthesisConfig,
    /// The output format.
    pub format: OutputFormat,
}

/// Fully resolved settings of the `perturb` command.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbSettings {
    /// Engine knobs after file values and overrides are applied.
    pub synthesis: SynthesisConfig,
    /// Draw count and seed.
    pub perturb: PerturbConfig,
    /// The output format of every drawn spectrum.
    pub format: OutputFormat,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

impl PartialRunConfig {
    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::file(path, e))
    }

    /// Reads `path` if one was given; no file means every setting takes its default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Resolves `simulate` settings. Command-line values win over `-S` overrides,
    /// which win over the file.
    pub fn merge_with_simulate(mut self, args: &SimulateArgs) -> Result<SimulateSettings> {
        self.apply_set_values(&args.set_values)?;
        let synthesis = self.synthesis_config()?;
        let format = args
            .format
            .or(self.output.and_then(|o| o.format))
            .unwrap_or_else(|| OutputFormat::from_path(&args.output));
        Ok(SimulateSettings { synthesis, format })
    }

    /// Resolves `perturb` settings with the same precedence as `merge_with_simulate`.
    pub fn merge_with_perturb(mut self, args: &PerturbArgs) -> Result<PerturbSettings> {
        self.apply_set_values(&args.set_values)?;
        let synthesis = self.synthesis_config()?;

        let file_perturb = self.perturb.take().unwrap_or_default();
        let mut builder = PerturbConfigBuilder::new();
        if let Some(draws) = args.draws.or(file_perturb.draws) {
            builder = builder.draws(draws);
        }
        if let Some(seed) = args.seed.or(file_perturb.seed) {
            builder = builder.seed(seed);
        }
        let perturb = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let format = args
            .format
            .or(self.output.and_then(|o| o.format))
            .unwrap_or(OutputFormat::Ascii);
        Ok(PerturbSettings {
            synthesis,
            perturb,
            format,
        })
    }

    fn synthesis_config(&mut self) -> Result<SynthesisConfig> {
        let partial = self.synthesis.take().unwrap_or_default();
        let mut builder = SynthesisConfigBuilder::new();
        if let Some(width) = partial.min_linewidth {
            builder = builder.min_linewidth(width);
        }
        if let Some(tolerance) = partial.merge_tolerance {
            builder = builder.merge_tolerance(tolerance);
        }
        if let Some(floor) = partial.exp_floor {
            builder = builder.exp_floor(floor);
        }
        if let Some(lines) = partial.max_lines {
            builder = builder.max_lines(lines);
        }
        if let Some(order) = partial.max_derivative_order {
            builder = builder.max_derivative_order(order);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "synthesis.min-linewidth" => {
                    self.synthesis_mut().min_linewidth = Some(parse_value(key, value)?);
                }
                "synthesis.merge-tolerance" => {
                    self.synthesis_mut().merge_tolerance = Some(parse_value(key, value)?);
                }
                "synthesis.exp-floor" => {
                    self.synthesis_mut().exp_floor = Some(parse_value(key, value)?);
                }
                "synthesis.max-lines" => {
                    self.synthesis_mut().max_lines = Some(parse_value(key, value)?);
                }
                "synthesis.max-derivative-order" => {
                    self.synthesis_mut().max_derivative_order = Some(parse_value(key, value)?);
                }
                "output.format" => {
                    let format = <OutputFormat as ValueEnum>::from_str(value, true).map_err(|_| {
                        CliError::Config(format!("Invalid value for {}: {}", key, value))
                    })?;
                    self.output.get_or_insert_with(Default::default).format = Some(format);
                }
                "perturb.draws" => {
                    self.perturb.get_or_insert_with(Default::default).draws =
                        Some(parse_value(key, value)?);
                }
                "perturb.seed" => {
                    self.perturb.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn synthesis_mut(&mut self) -> &mut PartialSynthesisConfig {
        self.synthesis.get_or_insert_with(Default::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("eprsim.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn simulate_args(extra: &[&str]) -> SimulateArgs {
        let mut args = vec!["eprsim", "simulate", "-i", "in.sim", "-o", "out.csv"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Simulate(args) => args,
            _ => panic!("Expected 'simulate' subcommand"),
        }
    }

    fn perturb_args(extra: &[&str]) -> PerturbArgs {
        let mut args = vec!["eprsim", "perturb", "-i", "in.json", "-o", "draws"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Perturb(args) => args,
            _ => panic!("Expected 'perturb' subcommand"),
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = PartialRunConfig::load(None)
            .unwrap()
            .merge_with_simulate(&simulate_args(&[]))
            .unwrap();
        assert_eq!(settings.synthesis, SynthesisConfig::default());
        assert_eq!(settings.format, OutputFormat::Csv);
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
        [synthesis]
        min-linewidth = 1e-4
        max-derivative-order = 2

        [output]
        format = "json"
        "#,
        );
        let settings = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_simulate(&simulate_args(&[]))
            .unwrap();
        assert_eq!(settings.synthesis.min_linewidth, 1e-4);
        assert_eq!(settings.synthesis.max_derivative_order, 2);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
        [synthesis]
        max-lines = 1000 # Will be overridden

        [output]
        format = "json" # Will be overridden

        [perturb]
        draws = 5 # Will be overridden
        seed = 17
        "#,
        );

        let args = simulate_args(&["-f", "ascii", "-S", "synthesis.max-lines=64"]);
        let settings = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_simulate(&args)
            .unwrap();
        assert_eq!(settings.synthesis.max_lines, 64);
        assert_eq!(settings.format, OutputFormat::Ascii);

        let settings = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_perturb(&perturb_args(&["--draws", "12"]))
            .unwrap();
        assert_eq!(settings.perturb, PerturbConfig { draws: 12, seed: 17 });
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn set_values_cover_every_section() {
        let args = perturb_args(&[
            "-S",
            "perturb.seed=99",
            "-S",
            "output.format=CSV",
            "-S",
            "synthesis.exp-floor=0",
        ]);
        let settings = PartialRunConfig::default().merge_with_perturb(&args).unwrap();
        assert_eq!(settings.perturb.seed, 99);
        assert_eq!(settings.perturb.draws, PerturbConfig::default().draws);
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.synthesis.exp_floor, 0.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "[synthesis]\nlinewidth = 1.0\n");
        assert!(matches!(
            PartialRunConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));

        let result = PartialRunConfig::default()
            .merge_with_simulate(&simulate_args(&["-S", "synthesis.unknown=1"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["synthesis.max-lines", "synthesis.max-lines=many", "output.format=xml"] {
            let result =
                PartialRunConfig::default().merge_with_simulate(&simulate_args(&["-S", bad]));
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn invalid_values_fail_validation() {
        let result = PartialRunConfig::default()
            .merge_with_simulate(&simulate_args(&["-S", "synthesis.min-linewidth=-1"]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = PartialRunConfig::default().merge_with_perturb(&perturb_args(&["-n", "0"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
