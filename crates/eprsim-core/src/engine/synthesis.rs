use super::config::SynthesisConfig;
use super::derivative::derivative;
use super::error::SimulationError;
use super::multiplet::stick_spectrum;
use super::progress::{Progress, ProgressReporter};
use crate::core::lineshape::PseudoVoigt;
use crate::core::models::radical::Radical;
use crate::core::models::simulator::Simulator;
use tracing::{debug, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sampling grid shared by every radical of one synthesis.
struct Grid {
    axis: Vec<f64>,
    center: f64,
    spacing: f64,
}

impl Simulator {
    /// Synthesizes the spectrum with the default [`SynthesisConfig`].
    ///
    /// # Return
    ///
    /// `points` samples over `0..=sweep`. A simulator without radicals yields a curve
    /// of zeros.
    ///
    /// # Errors
    ///
    /// See [`Simulator::calc_with`].
    pub fn calc(&self) -> Result<Vec<f64>, SimulationError> {
        self.calc_with(&SynthesisConfig::default(), &ProgressReporter::new())
    }

    /// Synthesizes the spectrum, reporting one `TaskIncrement` per radical.
    ///
    /// Radicals are computed independently (in parallel with the `parallel` feature)
    /// and summed in `rads` order afterwards, so the result does not depend on
    /// scheduling.
    ///
    /// # Arguments
    ///
    /// * `config` - The numerical knobs of the engine.
    /// * `reporter` - Receives one task spanning all radicals.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] for an invalid `config`, any validation
    /// error of the simulator itself, [`SimulationError::TooManyLines`] when a radical
    /// expands past `config.max_lines`, and
    /// [`SimulationError::DerivativeOrderTooHigh`] when `dh1` asks for too many derivatives.
    #[instrument(skip_all, name = "synthesis", fields(sweep = self.sweep, points = self.points, radicals = self.rads.len()))]
    pub fn calc_with(
        &self,
        config: &SynthesisConfig,
        reporter: &ProgressReporter,
    ) -> Result<Vec<f64>, SimulationError> {
        config.validate()?;
        self.validate()?;

        if self.rads.is_empty() {
            debug!("No radicals to synthesize. Returning a flat curve.");
            return Ok(vec![0.0; self.points]);
        }

        let grid = Grid {
            axis: self.field_axis(),
            center: self.center(),
            spacing: self.spacing(),
        };

        reporter.phase("Synthesis", || -> Result<Vec<f64>, SimulationError> {
            reporter.report(Progress::TaskStart {
                total_steps: self.rads.len() as u64,
            });

            #[cfg(not(feature = "parallel"))]
            let iterator = self.rads.iter().enumerate();

            #[cfg(feature = "parallel")]
            let iterator = self.rads.par_iter().enumerate();

            let contributions: Vec<Result<Option<Vec<f64>>, SimulationError>> = iterator
                .map(|(index, radical)| {
                    let contribution = radical_contribution(index, radical, &grid, config);
                    reporter.report(Progress::TaskIncrement);
                    contribution
                })
                .collect();

            reporter.report(Progress::TaskFinish);

            let mut curve = vec![0.0; self.points];
            for contribution in contributions {
                if let Some(values) = contribution? {
                    for (total, value) in curve.iter_mut().zip(values) {
                        *total += value;
                    }
                }
            }
            debug!("Synthesis finished.");
            Ok(curve)
        })
    }
}

/// The sampled, abundance-weighted and differentiated curve of one radical, or `None`
/// when the radical does not contribute.
fn radical_contribution(
    index: usize,
    radical: &Radical,
    grid: &Grid,
    config: &SynthesisConfig,
) -> Result<Option<Vec<f64>>, SimulationError> {
    let amount = radical.amount.val;
    if amount == 0.0 {
        trace!(radical = index, "Radical has zero amount, skipping.");
        return Ok(None);
    }

    let order = derivative_order(index, radical.dh1.val, config)?;
    let kernel = PseudoVoigt::new(
        effective_linewidth(index, radical.lwa.val, config),
        lorentzian_fraction(index, radical.lrtz.val),
    )
    .with_exp_floor(config.exp_floor);

    let sticks = stick_spectrum(radical, index, config)?;
    trace!(radical = index, lines = sticks.len(), order, "Broadening stick spectrum");

    let mut values = vec![0.0; grid.axis.len()];
    for stick in &sticks {
        let position = grid.center + stick.offset;
        let weight = amount * stick.intensity;
        for (value, &field) in values.iter_mut().zip(&grid.axis) {
            *value += weight * kernel.eval(field - position);
        }
    }

    Ok(Some(derivative(values, grid.spacing, order)))
}

fn effective_linewidth(index: usize, lwa: f64, config: &SynthesisConfig) -> f64 {
    if lwa < config.min_linewidth {
        warn!(
            radical = index,
            lwa,
            min = config.min_linewidth,
            "Linewidth below the minimum; clamping."
        );
        config.min_linewidth
    } else {
        lwa
    }
}

fn lorentzian_fraction(index: usize, lrtz: f64) -> f64 {
    let clamped = lrtz.clamp(0.0, 1.0);
    if clamped != lrtz {
        warn!(radical = index, lrtz, "Lorentzian fraction outside [0, 1]; clamping.");
    }
    clamped
}

fn derivative_order(index: usize, dh1: f64, config: &SynthesisConfig) -> Result<u32, SimulationError> {
    let order = dh1.round();
    if order < 0.0 {
        warn!(radical = index, dh1, "Negative derivative order; using absorption.");
        return Ok(0);
    }
    if order > f64::from(config.max_derivative_order) {
        return Err(SimulationError::DerivativeOrderTooHigh {
            radical: index,
            order,
            limit: config.max_derivative_order,
        });
    }
    Ok(order as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::nucleus::Nucleus;
    use crate::core::models::param::Param;
    use std::sync::atomic::{AtomicU64, Ordering};

    const TOLERANCE: f64 = 1e-9;

    fn single_line(lwa: f64, lrtz: f64, amount: f64, dh1: f64) -> Simulator {
        Simulator::new(100.0, 1024, vec![Radical::fixed(lwa, lrtz, amount, dh1)])
    }

    fn argmax(values: &[f64]) -> usize {
        values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap()
    }

    fn assert_curves_close(a: &[f64], b: &[f64], tolerance: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tolerance, "{x} != {y}");
        }
    }

    #[test]
    fn no_radicals_give_zero_curve_of_requested_length() {
        let curve = Simulator::new(50.0, 77, Vec::new()).calc().unwrap();
        assert_eq!(curve, vec![0.0; 77]);
    }

    #[test]
    fn curve_length_equals_points() {
        for points in [1, 2, 3, 100, 1025] {
            let sim = Simulator::new(60.0, points, vec![Radical::probe()]);
            assert_eq!(sim.calc().unwrap().len(), points);
        }
    }

    #[test]
    fn single_line_peaks_at_the_center() {
        let curve = single_line(1.0, 0.5, 1.0, 0.0).calc().unwrap();
        let peak = argmax(&curve) as f64;
        assert!((peak - 511.5).abs() <= 0.5);
        assert!(curve.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn absorption_area_matches_amount() {
        let sim = single_line(2.0, 0.0, 3.0, 0.0);
        let curve = sim.calc().unwrap();
        let area: f64 = curve.iter().sum::<f64>() * sim.spacing();
        assert!((area - 3.0).abs() < 1e-3);
    }

    #[test]
    fn scaling_amounts_scales_the_curve() {
        let mut sim = Simulator::new(100.0, 512, vec![Radical::probe(), Radical::electron()]);
        let base = sim.calc().unwrap();
        for radical in &mut sim.rads {
            radical.amount.val *= 2.5;
        }
        let scaled = sim.calc().unwrap();
        let expected: Vec<f64> = base.iter().map(|v| v * 2.5).collect();
        assert_curves_close(&expected, &scaled, TOLERANCE);
    }

    #[test]
    fn nucleus_order_does_not_change_the_curve() {
        let nucs = vec![
            Nucleus::fixed(0.5, 15.0, 1.0),
            Nucleus::fixed(1.0, 4.2, 2.0),
            Nucleus::fixed(2.5, 1.1, 1.0),
        ];
        let mut forward = Radical::fixed(0.8, 0.3, 1.0, 1.0);
        forward.nucs = nucs.clone();
        let mut backward = forward.clone();
        backward.nucs.reverse();

        let a = Simulator::new(100.0, 700, vec![forward]).calc().unwrap();
        let b = Simulator::new(100.0, 700, vec![backward]).calc().unwrap();
        assert_curves_close(&a, &b, TOLERANCE);
    }

    #[test]
    fn radicals_add_up() {
        let probe = Simulator::new(80.0, 300, vec![Radical::probe()]).calc().unwrap();
        let electron = Simulator::new(80.0, 300, vec![Radical::electron()])
            .calc()
            .unwrap();
        let both = Simulator::new(80.0, 300, vec![Radical::probe(), Radical::electron()])
            .calc()
            .unwrap();
        let expected: Vec<f64> = probe.iter().zip(&electron).map(|(a, b)| a + b).collect();
        assert_curves_close(&expected, &both, TOLERANCE);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let sim = Simulator::new(100.0, 400, vec![Radical::probe(), Radical::electron()]);
        assert_eq!(sim.calc().unwrap(), sim.calc().unwrap());
    }

    #[test]
    fn first_derivative_crosses_zero_at_the_center() {
        let curve = single_line(2.0, 0.5, 1.0, 1.0).calc().unwrap();
        let max = argmax(&curve);
        let min = curve
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!(max < 511 && min > 512);
        assert!(curve[max] > 0.0 && curve[min] < 0.0);
        assert!((curve[max] + curve[min]).abs() < 1e-6);
    }

    #[test]
    fn dh1_is_rounded_to_the_nearest_order() {
        let exact = single_line(1.5, 0.2, 1.0, 1.0).calc().unwrap();
        let rounded = single_line(1.5, 0.2, 1.0, 1.3).calc().unwrap();
        assert_eq!(exact, rounded);
    }

    #[test]
    fn negative_dh1_falls_back_to_absorption() {
        let absorption = single_line(1.0, 0.5, 1.0, 0.0).calc().unwrap();
        let negative = single_line(1.0, 0.5, 1.0, -2.0).calc().unwrap();
        assert_eq!(absorption, negative);
    }

    #[test]
    fn excessive_derivative_order_is_an_error() {
        let result = single_line(1.0, 0.5, 1.0, 7.0).calc();
        assert_eq!(
            result,
            Err(SimulationError::DerivativeOrderTooHigh {
                radical: 0,
                order: 7.0,
                limit: 4
            })
        );
    }

    #[test]
    fn zero_linewidth_is_clamped_not_fatal() {
        let curve = single_line(0.0, 0.5, 1.0, 0.0).calc().unwrap();
        assert!(curve.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn zero_amount_radical_contributes_nothing() {
        let curve = single_line(1.0, 0.5, 0.0, 0.0).calc().unwrap();
        assert!(curve.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn invalid_simulator_is_rejected_before_synthesis() {
        let mut radical = Radical::probe();
        radical.amount = Param::new(1.0, -1.0);
        let sim = Simulator::new(100.0, 64, vec![radical]);
        assert!(matches!(
            sim.calc(),
            Err(SimulationError::InvalidParameter { .. })
        ));
        assert_eq!(
            Simulator::new(-1.0, 64, Vec::new()).calc(),
            Err(SimulationError::InvalidSweep(-1.0))
        );
    }

    #[test]
    fn reporter_sees_one_increment_per_radical() {
        let increments = AtomicU64::new(0);
        let total = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskStart { total_steps } => total.store(total_steps, Ordering::SeqCst),
            Progress::TaskIncrement => {
                increments.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));
        let sim = Simulator::new(
            100.0,
            128,
            vec![Radical::probe(), Radical::electron(), Radical::probe()],
        );
        sim.calc_with(&SynthesisConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(total.into_inner(), 3);
        assert_eq!(increments.into_inner(), 3);
    }
}
