use std::f64::consts::PI;

use crate::rng::RandomSource;

/// Map `x` into `[lo, hi)` by periodic wrap-around.
///
/// Values already inside are returned untouched. Non-finite input maps
/// to `lo`, so the result is always inside the bound.
#[inline]
pub fn wrap(x: f64, lo: f64, hi: f64) -> f64 {
    debug_assert!(hi > lo, "wrap needs hi > lo, got [{lo}, {hi})");
    if x >= lo && x < hi {
        return x;
    }
    let wrapped = lo + (x - lo).rem_euclid(hi - lo);
    // rem_euclid can round up to exactly the width for tiny negative offsets
    if wrapped >= lo && wrapped < hi {
        wrapped
    } else {
        lo
    }
}

/// Log density of independent Gaussian noise with standard deviation
/// `sigma` around `curve`, summed over all samples.
pub fn gaussian_log_likelihood(data: &[f64], curve: &[f64], sigma: f64) -> f64 {
    assert_eq!(
        data.len(),
        curve.len(),
        "data and noise-free curve differ in length"
    );
    let var = sigma * sigma;
    let norm = -0.5 * (2.0 * PI * var).ln();
    data.iter()
        .zip(curve)
        .map(|(&y, &mu)| {
            let resid = y - mu;
            norm - 0.5 * resid * resid / var
        })
        .sum()
}

/// Unnormalized log density of `N(location, scale²)` at `y`.
#[inline]
pub fn normal_log_kernel(y: f64, location: f64, scale: f64) -> f64 {
    let z = (y - location) / scale;
    -0.5 * z * z
}

/// Metropolis step for a positive parameter with a lognormal prior.
///
/// Moves `ln(value)` by `jump_scale` times a heavy-tailed jump. The
/// proposal is symmetric in log space, so the returned log Hastings
/// factor is just the prior log-density difference there.
pub fn lognormal_step<R: RandomSource + ?Sized>(
    value: &mut f64,
    log_median: f64,
    log_sd: f64,
    jump_scale: f64,
    rng: &mut R,
) -> f64 {
    let old = value.ln();
    let new = old + jump_scale * rng.heavy_tailed_jump();
    *value = new.exp();
    normal_log_kernel(new, log_median, log_sd) - normal_log_kernel(old, log_median, log_sd)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::rng::testing::ScriptedSource;

    #[test]
    fn wrap_examples() {
        assert_eq!(wrap(0.25, 0.0, 1.0), 0.25);
        assert_abs_diff_eq!(wrap(1.25, 0.0, 1.0), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap(-0.25, 0.0, 1.0), 0.75, epsilon = 1e-12);
        assert_eq!(wrap(1.0, 0.0, 1.0), 0.0);
        assert_abs_diff_eq!(wrap(7.5, 2.0, 4.0), 3.5, epsilon = 1e-12);
        assert_eq!(wrap(-1e-20, 0.0, 1.0), 0.0);
        assert_eq!(wrap(f64::NAN, 0.0, 1.0), 0.0);
    }

    proptest! {
        #[test]
        fn wrap_lands_in_bounds(x in -1e6f64..1e6, lo in -100f64..100.0, width in 1e-3f64..50.0) {
            let hi = lo + width;
            let y = wrap(x, lo, hi);
            prop_assert!(y >= lo && y < hi, "wrap({x}, {lo}, {hi}) = {y}");
        }

        #[test]
        fn wrap_is_idempotent(x in -1e6f64..1e6, lo in -100f64..100.0, width in 1e-3f64..50.0) {
            let hi = lo + width;
            let y = wrap(x, lo, hi);
            prop_assert_eq!(wrap(y, lo, hi), y);
        }
    }

    #[test]
    fn single_sample_likelihood_at_mean() {
        let sigma = 0.3;
        let var = sigma * sigma;
        let logl = gaussian_log_likelihood(&[1.5], &[1.5], sigma);
        assert_eq!(logl, -0.5 * (2.0 * PI * var).ln());
    }

    #[test]
    fn likelihood_penalizes_residuals() {
        let sigma = 2.0;
        let logl = gaussian_log_likelihood(&[1.0, -1.0], &[0.0, 0.0], sigma);
        let expected = -(2.0 * PI * 4.0).ln() - 0.5 * 2.0 / 4.0;
        assert_abs_diff_eq!(logl, expected, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn likelihood_checks_lengths() {
        gaussian_log_likelihood(&[1.0, 2.0], &[1.0], 1.0);
    }

    #[test]
    fn lognormal_step_without_jump() {
        let mut width = 0.02;
        let mut rng = ScriptedSource::zero_jump(0);
        let log_h = lognormal_step(&mut width, 0.01f64.ln(), 1.0, 1.0, &mut rng);
        assert_eq!(log_h, 0.0);
        assert_abs_diff_eq!(width, 0.02, epsilon = 1e-15);
    }

    #[test]
    fn lognormal_step_hastings_factor() {
        let mut value = 1.0;
        let mut rng = ScriptedSource {
            jump: 0.5,
            ..ScriptedSource::zero_jump(0)
        };
        let log_h = lognormal_step(&mut value, 0.0, 3.0, 3.0, &mut rng);
        // ln(value) moves from 0 to 1.5
        assert_abs_diff_eq!(value, 1.5f64.exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(log_h, -0.5 * 0.25, epsilon = 1e-12);
    }
}
