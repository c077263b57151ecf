use super::{load_parameters, write_spectrum};
use crate::cli::{ConvertArgs, OutputFormat, extension_of};
use crate::error::{CliError, Result};
use eprsim::core::io::{
    ascii::AsciiSpectrumFile, delimited::CsvSpectrumFile, json::JsonParamsFile,
    json::JsonSpectrumFile, simpar::SimFile, traits::DataFile,
};
use eprsim::core::models::radical::Radical;
use eprsim::core::models::spectrum::Spectrum;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    SimParams,
    Json,
    Csv,
    Ascii,
}

impl FileKind {
    fn of(path: &Path) -> Self {
        match extension_of(path).as_deref() {
            Some("sim") => Self::SimParams,
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Ascii,
        }
    }
}

/// Converts between parameter formats (`.sim`, `.json`) or between spectrum formats
/// (ASCII, CSV, JSON). A `.json` file counts as parameters when the other side is a
/// `.sim` file or another `.json` file holding parameters, and as a spectrum otherwise.
pub fn run(args: ConvertArgs) -> Result<()> {
    let (from, to) = (FileKind::of(&args.input), FileKind::of(&args.output));
    info!("Converting {:?} ({:?}) to {:?} ({:?})", &args.input, from, &args.output, to);

    match (from, to) {
        (FileKind::SimParams, FileKind::SimParams | FileKind::Json) => {
            convert_parameters(&args.input, &args.output, to)?
        }
        (FileKind::Json, FileKind::SimParams) => {
            convert_parameters(&args.input, &args.output, to)?
        }
        (FileKind::SimParams, _) | (_, FileKind::SimParams) => {
            return Err(CliError::Argument(format!(
                "Cannot convert between parameters and spectra: {} -> {}",
                args.input.display(),
                args.output.display()
            )));
        }
        (FileKind::Json, FileKind::Json) if is_parameter_document(&args.input) => {
            convert_parameters(&args.input, &args.output, to)?
        }
        _ => {
            let spectrum = read_spectrum(&args.input, from)?;
            let format = match to {
                FileKind::Json => OutputFormat::Json,
                FileKind::Csv => OutputFormat::Csv,
                _ => OutputFormat::Ascii,
            };
            write_spectrum(&spectrum, &args.output, format)?;
        }
    }

    println!("✓ Converted {} -> {}", args.input.display(), args.output.display());
    Ok(())
}

fn convert_parameters(input: &Path, output: &Path, to: FileKind) -> Result<()> {
    let params = load_parameters(input)?;
    match to {
        FileKind::SimParams => {
            if params.rads.iter().any(has_variation) {
                info!("Variation windows are not representable in .sim files and are dropped.");
            }
            SimFile::write_to_path(&params, output).map_err(|e| CliError::file(output, e))
        }
        _ => JsonParamsFile::write_to_path(&params, output).map_err(|e| CliError::file(output, e)),
    }
}

fn has_variation(radical: &Radical) -> bool {
    let own = [radical.lwa, radical.lrtz, radical.amount, radical.dh1];
    let nuclear = radical.nucs.iter().flat_map(|n| [n.spin, n.hpf, n.eqs]);
    own.into_iter().chain(nuclear).any(|p| p.var != 0.0)
}

fn is_parameter_document(path: &Path) -> bool {
    JsonParamsFile::read_from_path(path).is_ok()
}

fn read_spectrum(path: &Path, kind: FileKind) -> Result<Spectrum> {
    match kind {
        FileKind::Json => JsonSpectrumFile::read_from_path(path).map_err(|e| CliError::file(path, e)),
        FileKind::Csv => CsvSpectrumFile::read_from_path(path).map_err(|e| CliError::file(path, e)),
        _ => AsciiSpectrumFile::read_from_path(path).map_err(|e| CliError::file(path, e)),
    }
}
