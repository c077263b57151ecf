use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The eprsim developers",
    version,
    about = "eprsim CLI - Simulate continuous-wave EPR spectra from hyperfine parameters, convert parameter and spectrum files, and draw perturbed ensembles.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to synthesize radicals in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize the spectrum described by a parameter file (.sim or .json).
    Simulate(SimulateArgs),
    /// Convert parameter files (.sim <-> .json) or spectra (ASCII, CSV, JSON).
    Convert(ConvertArgs),
    /// Draw randomized copies of a parameter set and synthesize each one.
    Perturb(PerturbArgs),
}

/// Spectrum output formats.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Whitespace-separated `index field intensity` rows with a header line
    Ascii,
    /// `index,field,intensity` records
    Csv,
    /// A JSON document with `indices`, `fields` and `intensities` arrays
    Json,
}

impl OutputFormat {
    /// Guesses the format from a file extension, falling back to ASCII.
    pub fn from_path(path: &Path) -> Self {
        match extension_of(path).as_deref() {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::Ascii,
        }
    }

    /// The file extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ascii => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Lower-cased extension of `path`, if it has one.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to the parameter file (.sim or .json).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the synthesized spectrum.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the number of samples from the parameter file.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,

    /// Override the field sweep from the parameter file.
    #[arg(long, value_name = "FLOAT")]
    pub sweep: Option<f64>,

    /// Output format. Inferred from the output extension when omitted.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S synthesis.max-derivative-order=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file; its kind is taken from the extension (.sim, .json, .csv, .txt/.asc/.dat).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output file; its kind is taken from the extension.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `perturb` subcommand.
#[derive(Args, Debug)]
pub struct PerturbArgs {
    /// Path to the parameter file (.sim or .json). Only parameters with a non-zero
    /// variation are perturbed, so a JSON file is usually what you want here.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory that receives one parameter file and one spectrum per draw.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of randomized copies to draw.
    #[arg(short = 'n', long, value_name = "INT")]
    pub draws: Option<usize>,

    /// Seed of the random generator; equal seeds give equal ensembles.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Spectrum format for every draw.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S perturb.draws=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
