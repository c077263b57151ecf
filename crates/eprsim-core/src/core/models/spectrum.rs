use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A sampled spectrum: one-based sample indices, field positions and intensities.
///
/// This is what the ASCII importer produces for experimental data and what
/// [`crate::workflows::simulate`] returns for theoretical curves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// The sample numbers, one-based for generated data.
    pub indices: Vec<usize>,
    /// The field position of each sample.
    pub fields: Vec<f64>,
    /// The signal at each sample.
    pub intensities: Vec<f64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Spectrum columns differ in length: {indices} indices, {fields} fields, {intensities} intensities"
)]
/// The column lengths of a spectrum that could not be assembled.
pub struct LengthMismatch {
    /// Length of the index column.
    pub indices: usize,
    /// Length of the field column.
    pub fields: usize,
    /// Length of the intensity column.
    pub intensities: usize,
}

impl Spectrum {
    /// Assembles a spectrum from three columns read side by side.
    ///
    /// # Arguments
    ///
    /// * `indices` - The sample numbers, as found in the source.
    /// * `fields` - The field position of each sample.
    /// * `intensities` - The signal at each sample.
    ///
    /// # Errors
    ///
    /// Returns [`LengthMismatch`] if the columns differ in length.
    pub fn new(
        indices: Vec<usize>,
        fields: Vec<f64>,
        intensities: Vec<f64>,
    ) -> Result<Self, LengthMismatch> {
        if indices.len() != fields.len() || fields.len() != intensities.len() {
            return Err(LengthMismatch {
                indices: indices.len(),
                fields: fields.len(),
                intensities: intensities.len(),
            });
        }
        Ok(Self {
            indices,
            fields,
            intensities,
        })
    }

    /// Pairs a curve with its field axis, numbering samples from 1.
    ///
    /// Extra entries of the longer column are dropped.
    pub fn from_curve(fields: Vec<f64>, intensities: Vec<f64>) -> Self {
        let len = fields.len().min(intensities.len());
        let mut fields = fields;
        let mut intensities = intensities;
        fields.truncate(len);
        intensities.truncate(len);
        Self {
            indices: (1..=len).collect(),
            fields,
            intensities,
        }
    }

    /// Intensities without a field axis; positions are implied as `0..len`.
    pub fn from_intensities(intensities: Vec<f64>) -> Self {
        let fields = (0..intensities.len()).map(|i| i as f64).collect();
        Self::from_curve(fields, intensities)
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// Returns `true` if the spectrum has no samples.
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// Iterates over the samples as `(index, field, intensity)` rows.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.indices
            .iter()
            .zip(&self.fields)
            .zip(&self.intensities)
            .map(|((&index, &field), &intensity)| (index, field, intensity))
    }

    /// Splits the spectrum into its `(indices, fields, intensities)` columns.
    pub fn into_parts(self) -> (Vec<usize>, Vec<f64>, Vec<f64>) {
        (self.indices, self.fields, self.intensities)
    }
}
