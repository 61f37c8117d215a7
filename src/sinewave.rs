//! Sinusoidal flux integrated over short exposure windows.

use std::f64::consts::{PI, TAU};
use std::sync::Arc;

use crate::error::{check_range, check_scale, Result};
use crate::grid::SampleGrid;
use crate::math::wrap;
use crate::model::ParameterModel;
use crate::rng::{ModelRng, RandomSource};

/// Seed of the exposure window schedule used by the default config.
pub const DEFAULT_WINDOW_SEED: u64 = 123;

/// Per-sample exposure widths of the instrument.
///
/// Each width is `2 * nominal * u` with `u` uniform, drawn once from a
/// stream with a fixed seed. The schedule is part of the instrument, not
/// of the sampled noise, so every model built from the same config sees
/// the same windows whatever the sampling stream does.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSchedule {
    widths: Arc<[f64]>,
}

impl WindowSchedule {
    pub fn from_seed(len: usize, nominal: f64, seed: u64) -> Self {
        let mut rng = ModelRng::seed_from_u64(seed);
        let widths = (0..len).map(|_| 2.0 * nominal * rng.uniform()).collect();
        WindowSchedule { widths }
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }
}

/// Constants of the sinusoid model.
#[derive(Debug, Clone, PartialEq)]
pub struct SinewaveConfig {
    grid: SampleGrid,
    nominal_window: f64,
    noise_sd: f64,
    max_amplitude: f64,
    min_period: f64,
    max_period: f64,
    windows: WindowSchedule,
}

impl SinewaveConfig {
    pub fn new(
        grid: SampleGrid,
        nominal_window: f64,
        noise_sd: f64,
        max_amplitude: f64,
        (min_period, max_period): (f64, f64),
        window_seed: u64,
    ) -> Result<Self> {
        let nominal_window = check_scale("nominal_window", nominal_window)?;
        let (min_period, max_period) = check_range(min_period, max_period)?;
        check_scale("min_period", min_period)?;
        Ok(SinewaveConfig {
            grid,
            nominal_window,
            noise_sd: check_scale("noise_sd", noise_sd)?,
            max_amplitude: check_scale("max_amplitude", max_amplitude)?,
            min_period,
            max_period,
            windows: WindowSchedule::from_seed(grid.len(), nominal_window, window_seed),
        })
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Nominal exposure width. The integrated flux is normalized by it.
    pub fn nominal_window(&self) -> f64 {
        self.nominal_window
    }

    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }

    /// Amplitude prior is uniform on `[0, max_amplitude)`.
    pub fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }

    /// Period prior is uniform on `[min_period, max_period)`.
    pub fn period_bounds(&self) -> (f64, f64) {
        (self.min_period, self.max_period)
    }

    /// One exposure width per grid sample.
    pub fn windows(&self) -> &WindowSchedule {
        &self.windows
    }
}

impl Default for SinewaveConfig {
    fn default() -> Self {
        let grid = SampleGrid::unit(21);
        let nominal_window = 0.01;
        SinewaveConfig {
            grid,
            nominal_window,
            noise_sd: 1.0,
            max_amplitude: 100.0,
            min_period: 0.05,
            max_period: 1.0,
            windows: WindowSchedule::from_seed(grid.len(), nominal_window, DEFAULT_WINDOW_SEED),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinewaveParams {
    pub amplitude: f64,
    pub period: f64,
    /// Phase in radians, in `[0, 2π)`.
    pub phase: f64,
}

#[derive(Debug, Clone)]
pub struct SinewaveModel {
    config: SinewaveConfig,
    params: SinewaveParams,
    curve: Vec<f64>,
}

impl SinewaveModel {
    /// A flat model at the shortest period. Call `from_prior` before use.
    pub fn new(config: SinewaveConfig) -> Self {
        let params = SinewaveParams {
            amplitude: 0.0,
            period: config.min_period,
            phase: 0.0,
        };
        Self::with_params(config, params)
    }

    pub fn with_params(config: SinewaveConfig, params: SinewaveParams) -> Self {
        let len = config.grid.len();
        assert_eq!(
            config.windows.widths().len(),
            len,
            "exposure schedule and sample grid differ in length"
        );
        let mut model = SinewaveModel {
            config,
            params,
            curve: vec![0.0; len],
        };
        model.compute_curve();
        model
    }

    pub fn config(&self) -> &SinewaveConfig {
        &self.config
    }

    pub fn params(&self) -> &SinewaveParams {
        &self.params
    }

    fn compute_curve(&mut self) {
        let SinewaveParams {
            amplitude,
            period,
            phase,
        } = self.params;
        let h = self.config.nominal_window;
        let samples = self
            .config
            .grid
            .coordinates()
            .zip(self.config.windows.widths().iter());
        for (mu, (t, &width)) in self.curve.iter_mut().zip(samples) {
            let a = t - 0.5 * width;
            let b = t + 0.5 * width;
            let integral = period * ((TAU * a / period + phase).cos() - (TAU * b / period + phase).cos())
                / (2.0 * PI);
            *mu = amplitude * integral / h;
        }
    }
}

impl Default for SinewaveModel {
    fn default() -> Self {
        Self::new(SinewaveConfig::default())
    }
}

impl ParameterModel for SinewaveModel {
    // Choices 2 and 3 both move the phase
    const PROPOSAL_CHOICES: usize = 4;

    fn from_prior<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let period_range = self.config.max_period - self.config.min_period;
        self.params.amplitude = self.config.max_amplitude * rng.uniform();
        self.params.period = self.config.min_period + period_range * rng.uniform();
        self.params.phase = TAU * rng.uniform();

        self.compute_curve();
    }

    fn perturb<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let config = &self.config;
        let params = &mut self.params;

        match rng.uniform_int(Self::PROPOSAL_CHOICES) {
            0 => {
                let amplitude = params.amplitude + config.max_amplitude * rng.heavy_tailed_jump();
                params.amplitude = wrap(amplitude, 0.0, config.max_amplitude);
            }
            1 => {
                let period_range = config.max_period - config.min_period;
                let period = params.period + period_range * rng.heavy_tailed_jump();
                params.period = wrap(period, config.min_period, config.max_period);
            }
            _ => {
                let phase = params.phase + TAU * rng.heavy_tailed_jump();
                params.phase = wrap(phase, 0.0, TAU);
            }
        }

        self.compute_curve();
        0.0
    }

    fn curve(&self) -> &[f64] {
        &self.curve
    }

    fn noise_sd(&self) -> f64 {
        self.config.noise_sd
    }

    fn parameters(&self) -> Vec<f64> {
        let p = &self.params;
        vec![p.amplitude, p.period, p.phase]
    }

    fn distance(&self, other: &Self) -> f64 {
        (self.params.period - other.params.period).abs()
    }
}
