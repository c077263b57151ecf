use super::builder::SimulatorBuilder;
use super::radical::Radical;
use serde::{Deserialize, Serialize};

/// The sampling of a field sweep and the radicals whose spectra are summed over it.
///
/// Samples sit at field offsets `j * sweep / (points - 1)` for `j` in `0..points`, so
/// the first sample is at `0.0` and the last at `sweep`. An unsplit line is centred at
/// `sweep / 2`. Synthesis itself is implemented in [`crate::engine::synthesis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulator {
    /// The total field range covered by the samples; must be positive.
    pub sweep: f64,
    /// The number of output samples; must be at least one.
    pub points: usize,
    /// The radicals whose contributions are summed, in order.
    #[serde(default)]
    pub rads: Vec<Radical>,
}

impl Simulator {
    /// Creates a simulator without validating it; see [`Simulator::validate`].
    ///
    /// # Arguments
    ///
    /// * `sweep` - The total field range.
    /// * `points` - The number of samples.
    /// * `rads` - The radicals to synthesize.
    pub fn new(sweep: f64, points: usize, rads: Vec<Radical>) -> Self {
        Self { sweep, points, rads }
    }

    /// Starts a named-field construction; see [`SimulatorBuilder`].
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    /// Returns the radicals in summation order.
    pub fn rads(&self) -> &[Radical] {
        &self.rads
    }

    /// Appends a radical after the existing ones.
    pub fn push_rad(&mut self, radical: Radical) {
        self.rads.push(radical);
    }

    /// Removes the most recently appended radical, if any.
    pub fn pop_rad(&mut self) -> Option<Radical> {
        self.rads.pop()
    }

    /// Field position of the unsplit line.
    pub fn center(&self) -> f64 {
        0.5 * self.sweep
    }

    /// Distance between neighbouring samples; the whole sweep when there is one sample.
    pub fn spacing(&self) -> f64 {
        if self.points > 1 {
            self.sweep / (self.points - 1) as f64
        } else {
            self.sweep
        }
    }

    /// Field offset of every sample, from `0.0` to `sweep`.
    pub fn field_axis(&self) -> Vec<f64> {
        if self.points == 1 {
            return vec![self.center()];
        }
        let spacing = self.spacing();
        (0..self.points).map(|j| j as f64 * spacing).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_axis_spans_the_whole_sweep() {
        let sim = Simulator::new(100.0, 11, Vec::new());
        let axis = sim.field_axis();
        assert_eq!(axis.len(), 11);
        assert_eq!(axis[0], 0.0);
        assert!((axis[10] - 100.0).abs() < 1e-12);
        assert!((axis[5] - sim.center()).abs() < 1e-12);
        assert!((sim.spacing() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_sits_at_the_center() {
        let sim = Simulator::new(40.0, 1, Vec::new());
        assert_eq!(sim.field_axis(), vec![20.0]);
        assert_eq!(sim.spacing(), 40.0);
    }

    #[test]
    fn zero_points_give_an_empty_axis() {
        let sim = Simulator::new(40.0, 0, Vec::new());
        assert!(sim.field_axis().is_empty());
    }

    #[test]
    fn push_and_pop_radicals() {
        let mut sim = Simulator::new(100.0, 1024, Vec::new());
        sim.push_rad(Radical::probe());
        sim.push_rad(Radical::electron());
        assert_eq!(sim.rads().len(), 2);
        assert_eq!(sim.pop_rad(), Some(Radical::electron()));
        assert_eq!(sim.rads().len(), 1);
    }
}
