use crate::core::io::traits::DataFile;
use crate::core::models::spectrum::Spectrum;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while reading or writing CSV spectra.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SpectrumRecord {
    index: usize,
    field: f64,
    intensity: f64,
}

/// A sampled spectrum as comma-separated `index,field,intensity` records with a header.
pub struct CsvSpectrumFile;

impl DataFile for CsvSpectrumFile {
    type Content = Spectrum;
    type Error = CsvError;

    fn read_from(reader: &mut impl BufRead) -> Result<Spectrum, CsvError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut spectrum = Spectrum::default();
        for result in csv_reader.deserialize::<SpectrumRecord>() {
            let record = result?;
            spectrum.indices.push(record.index);
            spectrum.fields.push(record.field);
            spectrum.intensities.push(record.intensity);
        }
        Ok(spectrum)
    }

    fn write_to(spectrum: &Spectrum, writer: &mut impl Write) -> Result<(), CsvError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (index, field, intensity) in spectrum.iter() {
            csv_writer.serialize(SpectrumRecord {
                index,
                field,
                intensity,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
