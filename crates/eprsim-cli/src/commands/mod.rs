pub mod convert;
pub mod perturb;
pub mod simulate;

use crate::cli::{OutputFormat, extension_of};
use crate::error::{CliError, Result};
use eprsim::core::io::{
    ascii::AsciiSpectrumFile, delimited::CsvSpectrumFile, json::JsonParamsFile,
    json::JsonSpectrumFile, simpar::SimFile, simpar::SimulationParameters, traits::DataFile,
};
use eprsim::core::models::spectrum::Spectrum;
use std::path::Path;
use tracing::debug;

/// Reads a parameter file, choosing the format from its extension. Anything that is not
/// `.json` is read as a `.sim` file.
pub(crate) fn load_parameters(path: &Path) -> Result<SimulationParameters> {
    debug!("Loading parameters from {:?}", path);
    match extension_of(path).as_deref() {
        Some("json") => JsonParamsFile::read_from_path(path).map_err(|e| CliError::file(path, e)),
        _ => SimFile::read_from_path(path).map_err(|e| CliError::file(path, e)),
    }
}

pub(crate) fn write_spectrum(spectrum: &Spectrum, path: &Path, format: OutputFormat) -> Result<()> {
    debug!("Writing {:?} spectrum to {:?}", format, path);
    match format {
        OutputFormat::Ascii => AsciiSpectrumFile::write_to_path(spectrum, path)
            .map_err(|e| CliError::file(path, e)),
        OutputFormat::Csv => {
            CsvSpectrumFile::write_to_path(spectrum, path).map_err(|e| CliError::file(path, e))
        }
        OutputFormat::Json => {
            JsonSpectrumFile::write_to_path(spectrum, path).map_err(|e| CliError::file(path, e))
        }
    }
}
