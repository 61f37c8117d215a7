//! Core abstraction for generative parameter models.
//!
//! Provides the `ParameterModel` trait: a prior over a small parameter
//! vector, a noise-free curve derived from it, a Metropolis proposal and
//! a Gaussian likelihood for data simulated from the curve.

use crate::math::gaussian_log_likelihood;
use crate::rng::RandomSource;
use crate::text::render_values;

/// Trait for parameter models that can be sampled by a Metropolis or
/// nested-sampling engine.
///
/// Implementors own their parameters and a cached noise-free curve. Every
/// method that changes a parameter must recompute the curve before it
/// returns, so `curve` always reflects the current parameters.
pub trait ParameterModel: Clone + Send {
    /// Number of choices `perturb` draws its move from.
    ///
    /// This is part of the proposal kernel. Changing it changes the
    /// stationary distribution of the chain.
    const PROPOSAL_CHOICES: usize;

    /// Overwrite all parameters with a draw from the prior.
    fn from_prior<R: RandomSource + ?Sized>(&mut self, rng: &mut R);

    /// Propose a move of one parameter in place.
    ///
    /// Returns the log Hastings factor of the move, which is the prior
    /// log-density ratio in the space the move is symmetric in. Moves that
    /// are symmetric in a space where the prior is flat return zero.
    fn perturb<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f64;

    /// The noise-free prediction at each sample of the grid.
    fn curve(&self) -> &[f64];

    /// Standard deviation of the observation noise.
    fn noise_sd(&self) -> f64;

    /// The parameter vector in its fixed output order.
    fn parameters(&self) -> Vec<f64>;

    /// A cheap dissimilarity between two parameter points.
    ///
    /// Symmetric and zero when the relevant parameters agree.
    fn distance(&self, other: &Self) -> f64;

    /// Simulate noisy observations around the current curve.
    fn simulate_data<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let sd = self.noise_sd();
        self.curve()
            .iter()
            .map(|&mu| mu + sd * rng.standard_normal())
            .collect()
    }

    /// Gaussian log-likelihood of `data` given the current parameters.
    fn log_likelihood(&self, data: &[f64]) -> f64 {
        gaussian_log_likelihood(data, self.curve(), self.noise_sd())
    }

    /// Stable text form of the parameter vector.
    fn render(&self) -> String {
        render_values(&self.parameters())
    }
}
