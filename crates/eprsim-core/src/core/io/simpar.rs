use crate::core::io::traits::DataFile;
use crate::core::models::nucleus::Nucleus;
use crate::core::models::param::Param;
use crate::core::models::radical::Radical;
use crate::core::models::simulator::Simulator;
use crate::engine::error::SimulationError;
use crate::engine::validation::validate_parts;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Everything needed to set up a [`Simulator`], in the order parameter files list it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// The number of samples.
    pub points: usize,
    /// The total field range.
    pub sweep: f64,
    /// The radicals, in file order.
    #[serde(default)]
    pub rads: Vec<Radical>,
}

impl SimulationParameters {
    /// Bundles parameters in file order without validating them.
    pub fn new(points: usize, sweep: f64, rads: Vec<Radical>) -> Self {
        Self { points, sweep, rads }
    }

    /// Checks the parameters as a simulator would.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`validate_parts`] finds.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_parts(self.sweep, self.points, &self.rads)
    }

    /// Splits into `(points, sweep, rads)`.
    pub fn into_parts(self) -> (usize, f64, Vec<Radical>) {
        (self.points, self.sweep, self.rads)
    }
}

impl From<SimulationParameters> for Simulator {
    fn from(params: SimulationParameters) -> Self {
        Simulator::new(params.sweep, params.points, params.rads)
    }
}

impl From<&Simulator> for SimulationParameters {
    fn from(sim: &Simulator) -> Self {
        Self::new(sim.points, sim.sweep, sim.rads.clone())
    }
}

/// Errors raised while reading or writing `.sim` files.
#[derive(Debug, Error)]
pub enum SimParError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: SimParParseErrorKind,
    },
    #[error("File ended before the value of '{field}'")]
    MissingValue { field: String },
    #[error("Invalid parameters: {0}")]
    Invalid(#[from] SimulationError),
}

/// What was wrong with a single `.sim` line.
#[derive(Debug, Error, PartialEq)]
pub enum SimParParseErrorKind {
    #[error("Invalid count for '{field}' (value: '{value}')")]
    InvalidCount { field: String, value: String },
    #[error("Invalid number for '{field}' (value: '{value}')")]
    InvalidFloat { field: String, value: String },
    #[error("Unexpected content after the last radical: '{value}'")]
    TrailingContent { value: String },
}

/// The line-oriented `.sim` parameter format.
///
/// One value per line: radical count, points, sweep, then for each radical its amount,
/// `dh1`, linewidth, Lorentzian percentage and nucleus count, followed by `eqs`, spin
/// and coupling of each nucleus. Blank lines and lines starting with `#` are skipped.
/// Values carry no variation, so every parsed [`Param`] is fixed.
pub struct SimFile;

struct ValueCursor {
    values: std::vec::IntoIter<(usize, String)>,
}

impl ValueCursor {
    fn next_raw(&mut self, field: &str) -> Result<(usize, String), SimParError> {
        self.values.next().ok_or_else(|| SimParError::MissingValue {
            field: field.to_string(),
        })
    }

    fn float(&mut self, field: &str) -> Result<f64, SimParError> {
        let (line, value) = self.next_raw(field)?;
        value.parse::<f64>().map_err(|_| SimParError::Parse {
            line,
            kind: SimParParseErrorKind::InvalidFloat {
                field: field.to_string(),
                value,
            },
        })
    }

    fn count(&mut self, field: &str) -> Result<usize, SimParError> {
        let (line, value) = self.next_raw(field)?;
        value.parse::<usize>().map_err(|_| SimParError::Parse {
            line,
            kind: SimParParseErrorKind::InvalidCount {
                field: field.to_string(),
                value,
            },
        })
    }

    fn param(&mut self, field: &str) -> Result<Param, SimParError> {
        self.float(field).map(Param::fixed)
    }

    /// Capacity for `count` items read from the file. Every item takes at least one
    /// value, so a count beyond the remaining values fails later with `MissingValue`.
    fn capacity_for(&self, count: usize) -> usize {
        count.min(self.values.len())
    }
}

fn read_radical(cursor: &mut ValueCursor, r: usize) -> Result<Radical, SimParError> {
    let amount = cursor.param(&format!("radical {r} amount"))?;
    let dh1 = cursor.param(&format!("radical {r} dh1"))?;
    let lwa = cursor.param(&format!("radical {r} lwa"))?;
    let lrtz_percent = cursor.float(&format!("radical {r} lrtz"))?;
    let nuc_count = cursor.count(&format!("radical {r} nucleus count"))?;

    let mut nucs = Vec::with_capacity(cursor.capacity_for(nuc_count));
    for n in 1..=nuc_count {
        let eqs = cursor.param(&format!("radical {r} nucleus {n} eqs"))?;
        let spin = cursor.param(&format!("radical {r} nucleus {n} spin"))?;
        let hpf = cursor.param(&format!("radical {r} nucleus {n} hpf"))?;
        nucs.push(Nucleus::new(spin, hpf, eqs));
    }

    Ok(Radical::new(
        lwa,
        Param::fixed(lrtz_percent / 100.0),
        amount,
        dh1,
        nucs,
    ))
}

impl DataFile for SimFile {
    type Content = SimulationParameters;
    type Error = SimParError;

    fn read_from(reader: &mut impl BufRead) -> Result<SimulationParameters, SimParError> {
        let mut values = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let value = line.trim();
            if value.is_empty() || value.starts_with('#') {
                continue;
            }
            values.push((line_num + 1, value.to_string()));
        }
        let mut cursor = ValueCursor {
            values: values.into_iter(),
        };

        let rad_count = cursor.count("radical count")?;
        let points = cursor.float("points")?;
        let sweep = cursor.float("sweep")?;

        let mut rads = Vec::with_capacity(cursor.capacity_for(rad_count));
        for r in 1..=rad_count {
            rads.push(read_radical(&mut cursor, r)?);
        }

        if let Some((line, value)) = cursor.values.next() {
            return Err(SimParError::Parse {
                line,
                kind: SimParParseErrorKind::TrailingContent { value },
            });
        }

        let simulator = Simulator::from_float_points(sweep, points, rads)?;
        Ok(SimulationParameters::from(&simulator))
    }

    fn write_to(params: &SimulationParameters, writer: &mut impl Write) -> Result<(), SimParError> {
        writeln!(writer, "{}", params.rads.len())?;
        writeln!(writer, "{}", params.points)?;
        writeln!(writer, "{}", params.sweep)?;
        for radical in &params.rads {
            writeln!(writer, "{}", radical.amount.val)?;
            writeln!(writer, "{}", radical.dh1.val)?;
            writeln!(writer, "{}", radical.lwa.val)?;
            writeln!(writer, "{}", radical.lrtz.val * 100.0)?;
            writeln!(writer, "{}", radical.nucs.len())?;
            for nucleus in &radical.nucs {
                writeln!(writer, "{}", nucleus.eqs.val)?;
                writeln!(writer, "{}", nucleus.spin.val)?;
                writeln!(writer, "{}", nucleus.hpf.val)?;
            }
        }
        Ok(())
    }
}

/// Parses `.sim` text into `(points, sweep, rads)`.
///
/// # Errors
///
/// Returns [`SimParError::Parse`] for a malformed value, [`SimParError::MissingValue`]
/// when the text ends early, and [`SimParError::Invalid`] when the parameters fail
/// validation.
pub fn get_from_sim(text: &str) -> Result<(usize, f64, Vec<Radical>), SimParError> {
    Ok(SimFile::read_from_str(text)?.into_parts())
}
