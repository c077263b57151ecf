use rand::Rng;
use serde::{Deserialize, Serialize};

/// A physical quantity with the half-width of the window it may be perturbed in.
///
/// `var` is not a statistical variance. [`Param::randomize`] draws the new value
/// uniformly from `[val - var, val + var]` and leaves `var` untouched, so a parameter with
/// `var == 0.0` never moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// The current value of the quantity.
    pub val: f64,
    /// Half-width of the window [`Param::randomize`] draws from; `0.0` fixes the value.
    pub var: f64,
}

impl Param {
    /// Creates a parameter that may be perturbed within `val ± var`.
    ///
    /// # Arguments
    ///
    /// * `val` - The nominal value.
    /// * `var` - The half-width of the perturbation window. Expected to be non-negative.
    pub const fn new(val: f64, var: f64) -> Self {
        Self { val, var }
    }

    /// A parameter that randomization leaves alone.
    pub const fn fixed(val: f64) -> Self {
        Self { val, var: 0.0 }
    }

    /// Returns the current value.
    #[inline]
    pub fn val(&self) -> f64 {
        self.val
    }

    /// Returns the half-width of the perturbation window.
    #[inline]
    pub fn var(&self) -> f64 {
        self.var
    }

    /// Replaces the value, keeping the window width.
    pub fn set_val(&mut self, val: f64) {
        self.val = val;
    }

    /// Replaces the window width, keeping the value.
    pub fn set_var(&mut self, var: f64) {
        self.var = var;
    }

    /// Returns `true` if randomization leaves this parameter unchanged.
    pub fn is_fixed(&self) -> bool {
        self.var == 0.0
    }

    /// Lower and upper bound of the perturbation window around the current value.
    ///
    /// # Return
    ///
    /// `(val - |var|, val + |var|)`.
    pub fn bounds(&self) -> (f64, f64) {
        let half_width = self.var.abs();
        (self.val - half_width, self.val + half_width)
    }

    /// Resamples `val` using the thread-local random source.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Resamples `val` uniformly from `[val - var, val + var]` using `rng`.
    ///
    /// A negative `var` spans the same window as its absolute value. A zero or
    /// non-finite `var` leaves the parameter unchanged.
    ///
    /// # Arguments
    ///
    /// * `rng` - The random source; a seeded generator gives reproducible draws.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.var == 0.0 || !self.var.is_finite() {
            return;
        }
        let unit: f64 = rng.gen_range(-1.0..=1.0);
        self.val += unit * self.var;
    }

    /// Returns a resampled copy, leaving `self` unchanged.
    pub fn randomized_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut copy = *self;
        copy.randomize_with(rng);
        copy
    }
}

impl From<f64> for Param {
    fn from(val: f64) -> Self {
        Self::fixed(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_stores_value_and_variation() {
        let param = Param::new(3.0, 2.0);
        assert_eq!(param.val(), 3.0);
        assert_eq!(param.var(), 2.0);
    }

    #[test]
    fn set_val_overwrites_value_only() {
        let mut param = Param::new(3.0, 2.0);
        param.set_val(5.0);
        assert_eq!(param, Param::new(5.0, 2.0));
    }

    #[test]
    fn randomize_with_zero_variation_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut param = Param::fixed(12.5);
        for _ in 0..100 {
            param.randomize_with(&mut rng);
            assert_eq!(param.val, 12.5);
        }
        param.randomize();
        assert_eq!(param.val, 12.5);
    }

    #[test]
    fn randomize_stays_within_window_and_keeps_variation() {
        let mut rng = StdRng::seed_from_u64(42);
        let nominal = Param::new(15.0, 1.0);
        for _ in 0..1000 {
            let drawn = nominal.randomized_with(&mut rng);
            assert!(drawn.val >= 14.0 && drawn.val <= 16.0, "{} out of window", drawn.val);
            assert_eq!(drawn.var, 1.0);
        }
    }

    #[test]
    fn repeated_randomize_stays_within_window_of_previous_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut param = Param::new(0.0, 0.25);
        for _ in 0..500 {
            let (low, high) = param.bounds();
            param.randomize_with(&mut rng);
            assert!(param.val >= low && param.val <= high);
        }
    }

    #[test]
    fn negative_variation_spans_symmetric_window() {
        let mut rng = StdRng::seed_from_u64(11);
        let nominal = Param::new(1.0, -0.5);
        assert_eq!(nominal.bounds(), (0.5, 1.5));
        for _ in 0..200 {
            let drawn = nominal.randomized_with(&mut rng);
            assert!(drawn.val >= 0.5 && drawn.val <= 1.5);
        }
    }

    #[test]
    fn randomize_actually_moves_value_when_variation_is_positive() {
        let mut rng = StdRng::seed_from_u64(5);
        let nominal = Param::new(10.0, 1.0);
        let moved = (0..50)
            .map(|_| nominal.randomized_with(&mut rng).val)
            .any(|v| v != 10.0);
        assert!(moved);
    }

    #[test]
    fn seeded_sources_reproduce_the_same_draws() {
        let nominal = Param::new(2.0, 0.5);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(nominal.randomized_with(&mut a), nominal.randomized_with(&mut b));
        }
    }
}
