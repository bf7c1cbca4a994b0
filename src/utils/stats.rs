//! Statistical utility functions.

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided standard normal critical value for a confidence level in (0, 1).
///
/// # Example
/// ```
/// use revenue_forecast::utils::stats::z_score;
///
/// let z = z_score(0.95).unwrap();
/// assert!((z - 1.959964).abs() < 1e-5);
/// ```
pub fn z_score(confidence: f64) -> Result<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidParameter(format!("standard normal: {}", e)))?;
    Ok(normal.inverse_cdf((1.0 + confidence) / 2.0))
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Root mean square of deviations from `center`.
pub fn spread_about(values: &[f64], center: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    (values.iter().map(|x| (x - center).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn z_score_known_values() {
        assert_relative_eq!(z_score(0.95).unwrap(), 1.959964, epsilon = 1e-5);
        assert_relative_eq!(z_score(0.80).unwrap(), 1.281552, epsilon = 1e-5);
        assert_relative_eq!(z_score(0.99).unwrap(), 2.575829, epsilon = 1e-5);
    }

    #[test]
    fn z_score_rejects_out_of_range() {
        assert!(z_score(0.0).is_err());
        assert!(z_score(1.0).is_err());
        assert!(z_score(-0.5).is_err());
        assert!(z_score(f64::NAN).is_err());
    }

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn spread_about_center() {
        assert_relative_eq!(spread_about(&[1.0, 3.0], 2.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(spread_about(&[3.0, 4.0], 0.0), 12.5_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(spread_about(&[5.0, 5.0], 5.0), 0.0);
    }
}
