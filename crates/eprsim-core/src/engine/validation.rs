use super::error::SimulationError;
use crate::core::models::param::Param;
use crate::core::models::radical::Radical;
use crate::core::models::simulator::Simulator;

const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// `2I` for a spin that is a non-negative multiple of 1/2.
pub(crate) fn spin_steps(spin: f64) -> Option<u32> {
    whole_number(2.0 * spin)
}

/// Number of equivalent nuclei, if `eqs` is a non-negative integer.
pub(crate) fn equivalent_count(eqs: f64) -> Option<u32> {
    whole_number(eqs)
}

fn whole_number(value: f64) -> Option<u32> {
    if !value.is_finite() || value < -INTEGRALITY_TOLERANCE {
        return None;
    }
    let rounded = value.round();
    if (value - rounded).abs() > INTEGRALITY_TOLERANCE || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

fn check_param(radical: usize, field: &str, param: &Param) -> Result<(), SimulationError> {
    if !param.val.is_finite() {
        return Err(SimulationError::InvalidParameter {
            radical,
            field: field.to_string(),
            value: param.val,
            reason: "value must be finite",
        });
    }
    if !param.var.is_finite() || param.var < 0.0 {
        return Err(SimulationError::InvalidParameter {
            radical,
            field: format!("{field}.var"),
            value: param.var,
            reason: "variation must be non-negative and finite",
        });
    }
    Ok(())
}

pub(crate) fn validate_radical(index: usize, radical: &Radical) -> Result<(), SimulationError> {
    check_param(index, "lwa", &radical.lwa)?;
    check_param(index, "lrtz", &radical.lrtz)?;
    check_param(index, "amount", &radical.amount)?;
    check_param(index, "dh1", &radical.dh1)?;
    if radical.amount.val < 0.0 {
        return Err(SimulationError::InvalidParameter {
            radical: index,
            field: "amount".to_string(),
            value: radical.amount.val,
            reason: "amount must be non-negative",
        });
    }

    for (n, nuc) in radical.nucs.iter().enumerate() {
        check_param(index, &format!("nucs[{n}].spin"), &nuc.spin)?;
        check_param(index, &format!("nucs[{n}].hpf"), &nuc.hpf)?;
        check_param(index, &format!("nucs[{n}].eqs"), &nuc.eqs)?;
        if spin_steps(nuc.spin.val).is_none() {
            return Err(SimulationError::InvalidSpin {
                radical: index,
                nucleus: n,
                spin: nuc.spin.val,
            });
        }
        if equivalent_count(nuc.eqs.val).is_none() {
            return Err(SimulationError::InvalidEquivalence {
                radical: index,
                nucleus: n,
                eqs: nuc.eqs.val,
            });
        }
    }
    Ok(())
}

/// Checks a sweep, a sample count and a set of radicals before synthesis.
///
/// Conditions with a safe default (non-positive `lwa`, negative `dh1`) are not errors
/// here; synthesis clamps them and logs a warning.
///
/// # Arguments
///
/// * `sweep` - The total field range.
/// * `points` - The number of samples.
/// * `rads` - The radicals, checked in order.
///
/// # Errors
///
/// Returns the first problem found: [`SimulationError::InvalidSweep`],
/// [`SimulationError::InvalidPoints`], [`SimulationError::InvalidParameter`],
/// [`SimulationError::InvalidSpin`] or [`SimulationError::InvalidEquivalence`].
pub fn validate_parts(sweep: f64, points: usize, rads: &[Radical]) -> Result<(), SimulationError> {
    if !(sweep.is_finite() && sweep > 0.0) {
        return Err(SimulationError::InvalidSweep(sweep));
    }
    if points == 0 {
        return Err(SimulationError::InvalidPoints(0.0));
    }
    rads.iter()
        .enumerate()
        .try_for_each(|(index, radical)| validate_radical(index, radical))
}

/// Converts a sample count given as a float, truncating any fractional part.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidPoints`] if `points` is not finite or truncates to
/// zero.
pub fn points_from_float(points: f64) -> Result<usize, SimulationError> {
    if !points.is_finite() || points < 1.0 || points > usize::MAX as f64 {
        return Err(SimulationError::InvalidPoints(points));
    }
    Ok(points.trunc() as usize)
}

impl Simulator {
    /// Builds a simulator from a sample count stored as a float, truncating it.
    ///
    /// Parameter files and Python callers pass counts such as `1024.0`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidPoints`] for a count below one, and any error
    /// [`Simulator::validate`] reports for the assembled simulator.
    pub fn from_float_points(
        sweep: f64,
        points: f64,
        rads: Vec<Radical>,
    ) -> Result<Self, SimulationError> {
        let simulator = Self::new(sweep, points_from_float(points)?, rads);
        simulator.validate()?;
        Ok(simulator)
    }

    /// Checks the simulator before synthesis; see [`validate_parts`].
    ///
    /// # Errors
    ///
    /// Returns the first problem [`validate_parts`] finds.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_parts(self.sweep, self.points, &self.rads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::nucleus::Nucleus;

    #[test]
    fn spin_steps_accepts_half_integers() {
        assert_eq!(spin_steps(0.0), Some(0));
        assert_eq!(spin_steps(0.5), Some(1));
        assert_eq!(spin_steps(1.0), Some(2));
        assert_eq!(spin_steps(3.5), Some(7));
    }

    #[test]
    fn spin_steps_rejects_other_values() {
        assert_eq!(spin_steps(0.3), None);
        assert_eq!(spin_steps(-0.5), None);
        assert_eq!(spin_steps(f64::NAN), None);
    }

    #[test]
    fn equivalent_count_requires_integers() {
        assert_eq!(equivalent_count(0.0), Some(0));
        assert_eq!(equivalent_count(6.0), Some(6));
        assert_eq!(equivalent_count(2.5), None);
        assert_eq!(equivalent_count(-1.0), None);
    }

    #[test]
    fn from_float_points_truncates() {
        let sim = Simulator::from_float_points(100.0, 1024.9, Vec::new()).unwrap();
        assert_eq!(sim.points, 1024);
    }

    #[test]
    fn whole_float_counts_are_accepted() {
        assert_eq!(points_from_float(1024.0), Ok(1024));
        assert_eq!(points_from_float(1.0), Ok(1));
        let sim = Simulator::from_float_points(100.0, 1024.0, vec![Radical::probe()]).unwrap();
        assert_eq!(sim.points, 1024);
        assert_eq!(sim.calc().unwrap().len(), 1024);
    }

    #[test]
    fn from_float_points_rejects_non_positive_counts() {
        for points in [0.0, 0.5, -3.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Simulator::from_float_points(100.0, points, Vec::new()),
                Err(SimulationError::InvalidPoints(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_non_positive_sweep() {
        let sim = Simulator::new(0.0, 10, Vec::new());
        assert_eq!(sim.validate(), Err(SimulationError::InvalidSweep(0.0)));
        let sim = Simulator::new(-5.0, 10, Vec::new());
        assert_eq!(sim.validate(), Err(SimulationError::InvalidSweep(-5.0)));
    }

    #[test]
    fn validate_rejects_zero_points() {
        let sim = Simulator::new(10.0, 0, Vec::new());
        assert_eq!(sim.validate(), Err(SimulationError::InvalidPoints(0.0)));
    }

    #[test]
    fn validate_rejects_negative_variation() {
        let mut radical = Radical::probe();
        radical.lwa = Param::new(1.0, -0.1);
        let sim = Simulator::new(100.0, 16, vec![Radical::electron(), radical]);
        match sim.validate() {
            Err(SimulationError::InvalidParameter { radical, field, .. }) => {
                assert_eq!(radical, 1);
                assert_eq!(field, "lwa.var");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_fractional_spin() {
        let mut radical = Radical::electron();
        radical.push_nuc(Nucleus::fixed(0.3, 1.0, 1.0));
        let sim = Simulator::new(100.0, 16, vec![radical]);
        assert_eq!(
            sim.validate(),
            Err(SimulationError::InvalidSpin {
                radical: 0,
                nucleus: 0,
                spin: 0.3
            })
        );
    }

    #[test]
    fn validate_rejects_fractional_equivalence() {
        let mut radical = Radical::electron();
        radical.push_nuc(Nucleus::fixed(0.5, 1.0, 1.5));
        let sim = Simulator::new(100.0, 16, vec![radical]);
        assert!(matches!(
            sim.validate(),
            Err(SimulationError::InvalidEquivalence { eqs, .. }) if eqs == 1.5
        ));
    }

    #[test]
    fn validate_rejects_negative_amount_and_non_finite_values() {
        let mut negative = Radical::electron();
        negative.amount = Param::fixed(-1.0);
        assert!(validate_radical(0, &negative).is_err());

        let mut nan = Radical::electron();
        nan.lrtz = Param::fixed(f64::NAN);
        assert!(validate_radical(0, &nan).is_err());
    }

    #[test]
    fn validate_accepts_clampable_values() {
        let mut radical = Radical::probe();
        radical.lwa = Param::fixed(0.0);
        radical.dh1 = Param::fixed(-1.0);
        radical.lrtz = Param::fixed(1.7);
        assert_eq!(validate_parts(100.0, 32, &[radical]), Ok(()));
    }
}
