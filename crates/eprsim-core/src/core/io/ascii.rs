use crate::core::io::traits::DataFile;
use crate::core::models::spectrum::Spectrum;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while reading or writing ASCII spectra.
#[derive(Debug, Error)]
pub enum AsciiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: AsciiParseErrorKind,
    },
}

/// What was wrong with a single ASCII line.
#[derive(Debug, Error, PartialEq)]
pub enum AsciiParseErrorKind {
    #[error("Expected 3 columns (index, field, intensity), found {found}")]
    WrongColumnCount { found: usize },
    #[error("Invalid sample index '{value}'")]
    InvalidIndex { value: String },
    #[error("Invalid number in the {column} column (value: '{value}')")]
    InvalidFloat { column: &'static str, value: String },
}

const HEADER: &str = "index Field [G] Intensity []";

/// Experimental spectra exported as whitespace-separated `index field intensity` rows.
///
/// Lines before the first data row are treated as a free-form header and skipped. Once
/// data has started every non-blank line must be a complete row.
pub struct AsciiSpectrumFile;

fn parse_row(line: &str) -> Result<(usize, f64, f64), AsciiParseErrorKind> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    let [index, field, intensity] = cols.as_slice() else {
        return Err(AsciiParseErrorKind::WrongColumnCount { found: cols.len() });
    };

    let index = index
        .parse::<usize>()
        .map_err(|_| AsciiParseErrorKind::InvalidIndex {
            value: index.to_string(),
        })?;
    let field = parse_float(field, "field")?;
    let intensity = parse_float(intensity, "intensity")?;
    Ok((index, field, intensity))
}

fn parse_float(value: &str, column: &'static str) -> Result<f64, AsciiParseErrorKind> {
    value
        .parse::<f64>()
        .map_err(|_| AsciiParseErrorKind::InvalidFloat {
            column,
            value: value.to_string(),
        })
}

impl DataFile for AsciiSpectrumFile {
    type Content = Spectrum;
    type Error = AsciiError;

    fn read_from(reader: &mut impl BufRead) -> Result<Spectrum, AsciiError> {
        let mut spectrum = Spectrum::default();
        let mut in_data = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_row(line) {
                Ok((index, field, intensity)) => {
                    in_data = true;
                    spectrum.indices.push(index);
                    spectrum.fields.push(field);
                    spectrum.intensities.push(intensity);
                }
                Err(_) if !in_data => continue,
                Err(kind) => {
                    return Err(AsciiError::Parse {
                        line: line_num + 1,
                        kind,
                    });
                }
            }
        }

        Ok(spectrum)
    }

    fn write_to(spectrum: &Spectrum, writer: &mut impl Write) -> Result<(), AsciiError> {
        writeln!(writer, "{HEADER}")?;
        for (index, field, intensity) in spectrum.iter() {
            writeln!(writer, "{index} {field} {intensity}")?;
        }
        Ok(())
    }
}

/// Splits an ASCII spectrum into its columns.
///
/// # Return
///
/// The `(indices, fields, intensities)` columns in file order, all of equal length.
///
/// # Errors
///
/// Returns [`AsciiError::Parse`] for a malformed row after the data has started.
pub fn ascii_import(text: &str) -> Result<(Vec<usize>, Vec<f64>, Vec<f64>), AsciiError> {
    Ok(AsciiSpectrumFile::read_from_str(text)?.into_parts())
}

/// The intensity column alone, for callers that only compare curves sample by sample.
pub fn read_intensities(text: &str) -> Result<Vec<f64>, AsciiError> {
    Ok(AsciiSpectrumFile::read_from_str(text)?.intensities)
}
