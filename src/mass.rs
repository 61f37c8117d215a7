//! Gaussian profile of a source whose total mass is of interest.

use crate::error::{check_scale, Result};
use crate::grid::SampleGrid;
use crate::math::{lognormal_step, wrap};
use crate::model::ParameterModel;
use crate::rng::RandomSource;

/// Constants of the point-mass profile model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassConfig {
    grid: SampleGrid,
    noise_sd: f64,
    amplitude_log_sd: f64,
    max_width_fraction: f64,
}

impl MassConfig {
    pub fn new(
        grid: SampleGrid,
        noise_sd: f64,
        amplitude_log_sd: f64,
        max_width_fraction: f64,
    ) -> Result<Self> {
        Ok(MassConfig {
            grid,
            noise_sd: check_scale("noise_sd", noise_sd)?,
            amplitude_log_sd: check_scale("amplitude_log_sd", amplitude_log_sd)?,
            max_width_fraction: check_scale("max_width_fraction", max_width_fraction)?,
        })
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }

    /// Log-space standard deviation of the amplitude prior (median 1).
    pub fn amplitude_log_sd(&self) -> f64 {
        self.amplitude_log_sd
    }

    /// Upper end of the uniform width prior, as a fraction of the range.
    pub fn max_width_fraction(&self) -> f64 {
        self.max_width_fraction
    }

    /// The center prior covers the middle half of the grid.
    pub fn center_bounds(&self) -> (f64, f64) {
        let grid = &self.grid;
        (
            grid.lo() + 0.25 * grid.range(),
            grid.lo() + 0.75 * grid.range(),
        )
    }

    pub fn max_width(&self) -> f64 {
        self.max_width_fraction * self.grid.range()
    }
}

impl Default for MassConfig {
    fn default() -> Self {
        MassConfig {
            grid: SampleGrid::unit(1001),
            noise_sd: 1.0,
            amplitude_log_sd: 3.0,
            max_width_fraction: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MassParams {
    pub center: f64,
    pub amplitude: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct MassModel {
    config: MassConfig,
    params: MassParams,
    curve: Vec<f64>,
}

impl MassModel {
    /// A model with all parameters zero. Call `from_prior` before use.
    pub fn new(config: MassConfig) -> Self {
        Self::with_params(config, MassParams::default())
    }

    pub fn with_params(config: MassConfig, params: MassParams) -> Self {
        let mut model = MassModel {
            config,
            params,
            curve: vec![0.0; config.grid.len()],
        };
        model.compute_curve();
        model
    }

    pub fn config(&self) -> &MassConfig {
        &self.config
    }

    pub fn params(&self) -> &MassParams {
        &self.params
    }

    /// Riemann sum of the noise-free curve over the grid.
    pub fn mass(&self) -> f64 {
        self.curve.iter().sum::<f64>() * self.config.grid.spacing()
    }

    fn compute_curve(&mut self) {
        let MassParams {
            center,
            amplitude,
            width,
        } = self.params;
        // A zero-width profile has no extent
        if width <= 0.0 {
            self.curve.fill(0.0);
            return;
        }
        for (mu, x) in self.curve.iter_mut().zip(self.config.grid.coordinates()) {
            let z = (x - center) / width;
            *mu = amplitude * (-0.5 * z * z).exp();
        }
    }
}

impl Default for MassModel {
    fn default() -> Self {
        Self::new(MassConfig::default())
    }
}

impl ParameterModel for MassModel {
    const PROPOSAL_CHOICES: usize = 3;

    fn from_prior<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let (lo, hi) = self.config.center_bounds();
        self.params.center = lo + (hi - lo) * rng.uniform();
        self.params.amplitude = (self.config.amplitude_log_sd * rng.standard_normal()).exp();
        self.params.width = self.config.max_width() * rng.uniform();

        self.compute_curve();
    }

    fn perturb<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let mut log_h = 0.0;

        match rng.uniform_int(Self::PROPOSAL_CHOICES) {
            0 => {
                let (lo, hi) = self.config.center_bounds();
                let center = self.params.center + (hi - lo) * rng.heavy_tailed_jump();
                self.params.center = wrap(center, lo, hi);
            }
            1 => {
                let log_sd = self.config.amplitude_log_sd;
                log_h += lognormal_step(&mut self.params.amplitude, 0.0, log_sd, log_sd, rng);
            }
            _ => {
                let max_width = self.config.max_width();
                let width = self.params.width + max_width * rng.heavy_tailed_jump();
                self.params.width = wrap(width, 0.0, max_width);
            }
        }

        self.compute_curve();
        log_h
    }

    fn curve(&self) -> &[f64] {
        &self.curve
    }

    fn noise_sd(&self) -> f64 {
        self.config.noise_sd
    }

    fn parameters(&self) -> Vec<f64> {
        let p = &self.params;
        vec![p.center, p.amplitude, p.width]
    }

    /// Absolute log-ratio of the integrated masses.
    ///
    /// Equal masses are at distance zero, including two empty profiles.
    /// An empty profile is infinitely far from any non-empty one.
    fn distance(&self, other: &Self) -> f64 {
        let (m1, m2) = (self.mass(), other.mass());
        if m1 == m2 {
            0.0
        } else if m1 == 0.0 || m2 == 0.0 {
            f64::INFINITY
        } else {
            (m1.ln() - m2.ln()).abs()
        }
    }
}
