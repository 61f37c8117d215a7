use thiserror::Error;

/// Errors raised while building model configurations.
///
/// Sampling itself has no recoverable failures: once a configuration
/// is valid, every model operation is a total numeric computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("sample grid must contain at least one point")]
    EmptyGrid,
    #[error("invalid range [{lo}, {hi}): bounds must be finite with hi > lo")]
    InvalidRange { lo: f64, hi: f64 },
    #[error("{name} must be finite and positive, got {value}")]
    InvalidScale { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Check that `value` is a usable positive scale.
pub(crate) fn check_scale(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidScale { name, value })
    }
}

/// Check that `[lo, hi)` is a non-empty finite interval.
pub(crate) fn check_range(lo: f64, hi: f64) -> Result<(f64, f64)> {
    if lo.is_finite() && hi.is_finite() && hi > lo {
        Ok((lo, hi))
    } else {
        Err(ModelError::InvalidRange { lo, hi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_scales() {
        assert!(check_scale("width", 0.01).is_ok());
        assert_eq!(
            check_scale("width", 0.0),
            Err(ModelError::InvalidScale {
                name: "width",
                value: 0.0
            })
        );
        assert!(check_scale("width", f64::NAN).is_err());
        assert!(check_scale("width", f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!(check_range(0.0, 1.0).is_ok());
        assert!(check_range(1.0, 1.0).is_err());
        assert!(check_range(1.0, 0.0).is_err());
        assert!(check_range(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn messages_name_the_field() {
        let err = ModelError::InvalidScale {
            name: "noise_sd",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "noise_sd must be finite and positive, got -1");
    }
}
