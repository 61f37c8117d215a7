//! Box-shaped planetary transit observed in a light curve.

use crate::error::{check_scale, Result};
use crate::grid::SampleGrid;
use crate::math::{lognormal_step, wrap};
use crate::model::ParameterModel;
use crate::rng::RandomSource;

/// Constants of the transit model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitConfig {
    grid: SampleGrid,
    depth_scale: f64,
    lognormal_median: f64,
    lognormal_log_sd: f64,
}

impl TransitConfig {
    pub fn new(
        grid: SampleGrid,
        depth_scale: f64,
        lognormal_median: f64,
        lognormal_log_sd: f64,
    ) -> Result<Self> {
        Ok(TransitConfig {
            grid,
            depth_scale: check_scale("depth_scale", depth_scale)?,
            lognormal_median: check_scale("lognormal_median", lognormal_median)?,
            lognormal_log_sd: check_scale("lognormal_log_sd", lognormal_log_sd)?,
        })
    }

    /// Observation times. The transit center is uniform over this range.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Mean of the exponential prior on the depth.
    pub fn depth_scale(&self) -> f64 {
        self.depth_scale
    }

    /// Median of the lognormal priors on width and noise level.
    pub fn lognormal_median(&self) -> f64 {
        self.lognormal_median
    }

    /// Log-space standard deviation of those lognormal priors.
    pub fn lognormal_log_sd(&self) -> f64 {
        self.lognormal_log_sd
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        TransitConfig {
            grid: SampleGrid::unit(101),
            depth_scale: 0.1,
            lognormal_median: 0.01,
            lognormal_log_sd: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitParams {
    /// Time of mid-transit.
    pub center: f64,
    pub depth: f64,
    /// Full duration of the transit.
    pub width: f64,
    pub noise_sd: f64,
}

#[derive(Debug, Clone)]
pub struct TransitModel {
    config: TransitConfig,
    params: TransitParams,
    curve: Vec<f64>,
}

impl TransitModel {
    /// A model with all parameters zero. Call `from_prior` before use.
    pub fn new(config: TransitConfig) -> Self {
        Self::with_params(config, TransitParams::default())
    }

    pub fn with_params(config: TransitConfig, params: TransitParams) -> Self {
        let mut model = TransitModel {
            config,
            params,
            curve: vec![0.0; config.grid.len()],
        };
        model.compute_curve();
        model
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    pub fn params(&self) -> &TransitParams {
        &self.params
    }

    fn compute_curve(&mut self) {
        let start = self.params.center - 0.5 * self.params.width;
        let end = self.params.center + 0.5 * self.params.width;
        let depth = self.params.depth;
        for (mu, t) in self.curve.iter_mut().zip(self.config.grid.coordinates()) {
            *mu = if t > start && t < end { -depth } else { 0.0 };
        }
    }
}

impl Default for TransitModel {
    fn default() -> Self {
        Self::new(TransitConfig::default())
    }
}

impl ParameterModel for TransitModel {
    const PROPOSAL_CHOICES: usize = 4;

    fn from_prior<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let grid = &self.config.grid;
        let log_median = self.config.lognormal_median.ln();
        let log_sd = self.config.lognormal_log_sd;

        self.params.center = grid.lo() + grid.range() * rng.uniform();
        self.params.depth = -self.config.depth_scale * rng.uniform().ln();
        self.params.width = (log_median + log_sd * rng.standard_normal()).exp();
        self.params.noise_sd = (log_median + log_sd * rng.standard_normal()).exp();

        self.compute_curve();
    }

    fn perturb<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let grid = self.config.grid;
        let log_median = self.config.lognormal_median.ln();
        let log_sd = self.config.lognormal_log_sd;
        let mut log_h = 0.0;

        let which = rng.uniform_int(Self::PROPOSAL_CHOICES);
        match which {
            0 => {
                let center = self.params.center + grid.range() * rng.heavy_tailed_jump();
                self.params.center = wrap(center, grid.lo(), grid.hi());
            }
            1 => {
                // The exponential CDF maps the depth prior onto U(0, 1)
                let scale = self.config.depth_scale;
                let u = -(-self.params.depth / scale).exp_m1();
                let u = wrap(u + rng.heavy_tailed_jump(), 0.0, 1.0);
                self.params.depth = -scale * (-u).ln_1p();
            }
            2 => {
                log_h += lognormal_step(&mut self.params.width, log_median, log_sd, log_sd, rng);
            }
            _ => {
                log_h += lognormal_step(&mut self.params.noise_sd, log_median, log_sd, log_sd, rng);
            }
        }

        // The noise level does not enter the curve
        if which != 3 {
            self.compute_curve();
        }

        log_h
    }

    fn curve(&self) -> &[f64] {
        &self.curve
    }

    fn noise_sd(&self) -> f64 {
        self.params.noise_sd
    }

    fn parameters(&self) -> Vec<f64> {
        let p = &self.params;
        vec![p.center, p.depth, p.width, p.noise_sd]
    }

    fn distance(&self, other: &Self) -> f64 {
        (self.params.width.ln() - other.params.width.ln()).abs()
    }
}
