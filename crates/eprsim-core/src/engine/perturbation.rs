use crate::core::models::nucleus::Nucleus;
use crate::core::models::radical::Radical;
use crate::core::models::simulator::Simulator;
use rand::Rng;
use tracing::trace;

impl Nucleus {
    /// Resamples the coupling with the thread-local generator.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Resamples the hyperfine coupling. Spin and equivalence are discrete and stay put.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.hpf.randomize_with(rng);
    }
}

impl Radical {
    /// Like [`Radical::randomize_with`], using the thread-local generator.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Resamples linewidth, abundance, Lorentzian fraction, presentation and every
    /// coupling, then pulls values that left their physical range back into it.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.lwa.randomize_with(rng);
        self.amount.randomize_with(rng);
        self.lrtz.randomize_with(rng);
        self.dh1.randomize_with(rng);
        for nucleus in &mut self.nucs {
            nucleus.randomize_with(rng);
        }
        self.reset_aberrant();
    }

    /// Floors `lwa` and `amount` at zero and clamps `lrtz` to `[0, 1]`.
    pub fn reset_aberrant(&mut self) {
        if self.lwa.val < 0.0 {
            trace!(lwa = self.lwa.val, "Resetting negative linewidth");
            self.lwa.val = 0.0;
        }
        if self.amount.val < 0.0 {
            trace!(amount = self.amount.val, "Resetting negative amount");
            self.amount.val = 0.0;
        }
        self.lrtz.val = self.lrtz.val.clamp(0.0, 1.0);
    }
}

impl Simulator {
    /// Like [`Simulator::randomize_with`], using the thread-local generator.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Randomizes every radical in order. `sweep` and `points` are not parameters and
    /// never change.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for radical in &mut self.rads {
            radical.randomize_with(rng);
        }
    }

    /// Returns a randomized copy, leaving `self` unchanged.
    ///
    /// # Arguments
    ///
    /// * `rng` - The generator every draw is taken from; a seeded one reproduces the copy.
    pub fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut copy = self.clone();
        copy.randomize_with(rng);
        copy
    }
}

#[cfg(test)]
mod tests {
    use crate::core::models::nucleus::Nucleus;
    use crate::core::models::param::Param;
    use crate::core::models::radical::Radical;
    use crate::core::models::simulator::Simulator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn loose_radical() -> Radical {
        let mut radical = Radical::new(
            Param::new(1.0, 0.5),
            Param::new(0.5, 0.5),
            Param::new(2.0, 1.0),
            Param::new(0.0, 0.4),
            Vec::new(),
        );
        radical.push_nuc(Nucleus::new(
            Param::new(0.5, 0.2),
            Param::new(10.0, 2.0),
            Param::new(2.0, 1.0),
        ));
        radical
    }

    #[test]
    fn fixed_radical_is_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut radical = Radical::probe();
        radical.randomize_with(&mut rng);
        assert_eq!(radical, Radical::probe());
    }

    #[test]
    fn nucleus_only_moves_its_coupling() {
        let mut rng = StdRng::seed_from_u64(2);
        let original = loose_radical().nucs[0];
        for _ in 0..50 {
            let mut nucleus = original;
            nucleus.randomize_with(&mut rng);
            assert_eq!(nucleus.spin, original.spin);
            assert_eq!(nucleus.eqs, original.eqs);
            assert!((8.0..=12.0).contains(&nucleus.hpf.val));
        }
    }

    #[test]
    fn randomized_values_stay_in_range_after_reset() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let mut radical = loose_radical();
            radical.randomize_with(&mut rng);
            assert!((0.5..=1.5).contains(&radical.lwa.val));
            assert!((0.0..=1.0).contains(&radical.lrtz.val));
            assert!((1.0..=3.0).contains(&radical.amount.val));
            assert!((-0.4..=0.4).contains(&radical.dh1.val));
            assert_eq!(radical.lwa.var, 0.5);
        }
    }

    #[test]
    fn reset_aberrant_restores_physical_ranges() {
        let mut radical = Radical::fixed(-0.3, 1.4, -2.0, 0.0);
        radical.reset_aberrant();
        assert_eq!(radical.lwa.val, 0.0);
        assert_eq!(radical.amount.val, 0.0);
        assert_eq!(radical.lrtz.val, 1.0);
    }

    #[test]
    fn seeded_perturbation_is_reproducible() {
        let sim = Simulator::new(100.0, 256, vec![loose_radical(), loose_radical()]);
        let a = sim.perturbed(&mut StdRng::seed_from_u64(42));
        let b = sim.perturbed(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_ne!(a, sim);
        assert_eq!(a.sweep, sim.sweep);
        assert_eq!(a.points, sim.points);
    }
}
