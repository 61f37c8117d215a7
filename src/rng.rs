//! Random sources consumed by the parameter models.
//!
//! The models never talk to `rand` directly. They draw through
//! [`RandomSource`], which fixes the four kinds of draws the proposals
//! need. [`ModelRng`] implements it on top of any `rand` generator.

use rand::{distr::Open01, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// The draws a parameter model needs from its random stream.
pub trait RandomSource {
    /// A uniform draw from the open interval (0, 1).
    ///
    /// Zero is excluded so that `ln(uniform())` is always finite.
    fn uniform(&mut self) -> f64;

    /// A standard normal draw.
    fn standard_normal(&mut self) -> f64;

    /// A uniform integer in `0..k`.
    fn uniform_int(&mut self, k: usize) -> usize;

    /// A symmetric heavy-tailed step for Metropolis proposals.
    ///
    /// `10^(1.5 - 3|t|) * n` with `t` Student-t with two degrees of
    /// freedom and `n` standard normal. The step size spans several
    /// orders of magnitude, so one proposal kernel mixes coarse and
    /// fine moves.
    fn heavy_tailed_jump(&mut self) -> f64 {
        let t = self.standard_normal() / (-self.uniform().ln()).sqrt();
        10f64.powf(1.5 - 3.0 * t.abs()) * self.standard_normal()
    }
}

/// A [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct ModelRng<R = ChaCha8Rng> {
    rng: R,
}

impl ModelRng<ChaCha8Rng> {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// An independent stream for one sampling replica.
    ///
    /// All replicas share the seed and differ in the ChaCha stream id,
    /// so a run is reproducible given the seed alone.
    pub fn for_replica(seed: u64, replica: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(replica);
        Self::new(rng)
    }
}

impl<R: Rng> ModelRng<R> {
    pub fn new(rng: R) -> Self {
        ModelRng { rng }
    }
}

impl<R: Rng> RandomSource for ModelRng<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.sample(Open01)
    }

    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    fn uniform_int(&mut self, k: usize) -> usize {
        self.rng.random_range(0..k)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Replays fixed values, for checking proposals without noise.
    #[derive(Debug, Clone)]
    pub(crate) struct ScriptedSource {
        pub(crate) choice: usize,
        pub(crate) uniform: f64,
        pub(crate) normal: f64,
        pub(crate) jump: f64,
    }

    impl ScriptedSource {
        /// Always picks `choice` and never moves.
        pub(crate) fn zero_jump(choice: usize) -> Self {
            ScriptedSource {
                choice,
                uniform: 0.5,
                normal: 0.0,
                jump: 0.0,
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn uniform(&mut self) -> f64 {
            self.uniform
        }

        fn standard_normal(&mut self) -> f64 {
            self.normal
        }

        fn uniform_int(&mut self, k: usize) -> usize {
            assert!(self.choice < k, "scripted choice out of range");
            self.choice
        }

        fn heavy_tailed_jump(&mut self) -> f64 {
            self.jump
        }
    }
}
