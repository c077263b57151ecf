use crate::core::io::ascii::{AsciiError, AsciiSpectrumFile};
use crate::core::io::simpar::{SimFile, SimParError, SimulationParameters};
use crate::core::io::traits::DataFile;
use crate::core::models::spectrum::{LengthMismatch, Spectrum};
use crate::engine::error::SimulationError;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised by the JSON readers, writers and converters.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid parameters: {0}")]
    Invalid(#[from] SimulationError),
    #[error("Invalid spectrum: {0}")]
    Spectrum(#[from] LengthMismatch),
    #[error("Failed to read parameter file: {0}")]
    SimPar(#[from] SimParError),
    #[error("Failed to read ASCII spectrum: {0}")]
    Ascii(#[from] AsciiError),
}

/// Simulation parameters as a pretty-printed JSON document.
///
/// Every parameter is an object `{ "val": .., "var": .. }`, so unlike `.sim` files the
/// variation windows survive a round trip. Documents are validated after parsing.
pub struct JsonParamsFile;

impl DataFile for JsonParamsFile {
    type Content = SimulationParameters;
    type Error = JsonError;

    fn read_from(reader: &mut impl BufRead) -> Result<SimulationParameters, JsonError> {
        let params: SimulationParameters = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    fn write_to(params: &SimulationParameters, writer: &mut impl Write) -> Result<(), JsonError> {
        serde_json::to_writer_pretty(&mut *writer, params)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// A sampled spectrum as `{ "indices": [..], "fields": [..], "intensities": [..] }`.
pub struct JsonSpectrumFile;

impl DataFile for JsonSpectrumFile {
    type Content = Spectrum;
    type Error = JsonError;

    fn read_from(reader: &mut impl BufRead) -> Result<Spectrum, JsonError> {
        let raw: Spectrum = serde_json::from_reader(reader)?;
        Ok(Spectrum::new(raw.indices, raw.fields, raw.intensities)?)
    }

    fn write_to(spectrum: &Spectrum, writer: &mut impl Write) -> Result<(), JsonError> {
        serde_json::to_writer_pretty(&mut *writer, spectrum)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Serializes parameters as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns [`JsonError::Serde`] if serialization fails.
pub fn to_json(params: &SimulationParameters) -> Result<String, JsonError> {
    JsonParamsFile::write_to_string(params)
}

/// Parses a JSON parameter document.
///
/// # Arguments
///
/// * `text` - The document, as written by [`to_json`].
///
/// # Errors
///
/// Returns [`JsonError::Serde`] for malformed JSON and [`JsonError::Invalid`] when
/// the parameters fail validation.
pub fn from_json(text: &str) -> Result<SimulationParameters, JsonError> {
    JsonParamsFile::read_from_str(text)
}

/// Converts `.sim` text to a JSON parameter document.
pub fn sim_as_json(text: &str) -> Result<String, JsonError> {
    to_json(&SimFile::read_from_str(text)?)
}

/// Converts an ASCII spectrum to a JSON spectrum document.
pub fn ascii_as_json(text: &str) -> Result<String, JsonError> {
    JsonSpectrumFile::write_to_string(&AsciiSpectrumFile::read_from_str(text)?)
}
