use std::io::Write;

use tracing::{debug, trace};

use crate::model::ParameterModel;
use crate::rng::RandomSource;
use crate::text::render_values;

/// What a Metropolis or nested-sampling engine needs from a point.
pub trait SamplingUnit {
    /// Draw a fresh point from the joint distribution.
    ///
    /// This must be called before `perturb`.
    fn generate<R: RandomSource + ?Sized>(&mut self, rng: &mut R);

    /// Propose a move in place and return its log Hastings factor.
    ///
    /// The engine accepts the move if `ln(u) < log_h` for a uniform `u`
    /// and otherwise restores its own copy of the previous point.
    fn perturb<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f64;

    /// Write the stable text form of the point.
    fn print<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()>;

    /// Dissimilarity of two points, used for diagnostics.
    fn distance(x: &Self, y: &Self) -> f64;
}

/// A parameter draw together with the data it simulated.
///
/// The data is fixed once `generate` has run. Only the parameters move
/// afterwards, and the cached log-likelihood is refreshed on every move.
#[derive(Debug, Clone)]
pub struct JointPoint<P: ParameterModel> {
    params: P,
    data: Option<Box<[f64]>>,
    log_likelihood: f64,
}

impl<P: ParameterModel> JointPoint<P> {
    pub fn new(params: P) -> Self {
        JointPoint {
            params,
            data: None,
            log_likelihood: f64::NEG_INFINITY,
        }
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    /// The simulated data, if the point has been generated.
    pub fn data(&self) -> Option<&[f64]> {
        self.data.as_deref()
    }

    /// Cached log-likelihood of the data under the current parameters.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Distance between the parameters of two points. Ignores the data.
    pub fn parameter_distance(x: &Self, y: &Self) -> f64 {
        x.params.distance(&y.params)
    }

    /// Parameters, then data, space separated.
    pub fn render(&self) -> String {
        let data = self
            .data
            .as_deref()
            .expect("JointPoint rendered before generate");
        format!("{} {}", self.params.render(), render_values(data))
    }
}

impl<P: ParameterModel + Default> Default for JointPoint<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P: ParameterModel> SamplingUnit for JointPoint<P> {
    fn generate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.params.from_prior(rng);
        let data = self.params.simulate_data(rng);
        self.log_likelihood = self.params.log_likelihood(&data);
        self.data = Some(data.into());
        debug!(log_likelihood = self.log_likelihood, "generated joint point");
    }

    fn perturb<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let data = self
            .data
            .as_deref()
            .expect("JointPoint perturbed before generate");

        let mut log_h = -self.log_likelihood;
        log_h += self.params.perturb(rng);
        self.log_likelihood = self.params.log_likelihood(data);
        log_h += self.log_likelihood;

        trace!(log_h, log_likelihood = self.log_likelihood, "proposed move");
        log_h
    }

    fn print<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.render().as_bytes())
    }

    fn distance(x: &Self, y: &Self) -> f64 {
        Self::parameter_distance(x, y)
    }
}
