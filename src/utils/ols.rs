//! Closed-form simple linear regression used by the lag-one baseline.

use crate::error::{ForecastError, Result};

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleOLS {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination on the fitting data (1.0 when `y` is constant).
    pub r_squared: f64,
}

impl SimpleOLS {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit ordinary least squares of `y` on a single regressor `x` plus intercept.
///
/// When every `x` is identical the normal equations are singular; the
/// minimum-norm solution is returned instead (slope 0, intercept = mean of `y`).
pub fn simple_ols(x: &[f64], y: &[f64]) -> Result<SimpleOLS> {
    if x.len() != y.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "regressor has {} values but target has {}",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(ForecastError::insufficient("least squares", 1, 0));
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let (slope, intercept) = if x.iter().all(|&v| v == x[0]) {
        (0.0, y_mean)
    } else {
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let dx = xi - x_mean;
            sxx += dx * dx;
            sxy += dx * (yi - y_mean);
        }
        let slope = sxy / sxx;
        (slope, y_mean - slope * x_mean)
    };

    let ss_tot: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(SimpleOLS {
        slope,
        intercept,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ols_recovers_exact_line() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();
        let fit = simple_ols(&x, &y).unwrap();

        assert_relative_eq!(fit.slope, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, -2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 28.0, epsilon = 1e-10);
    }

    #[test]
    fn ols_known_noisy_values() {
        // Normal equations by hand: x_mean = 2, y_mean = 3, sxx = 2, sxy = 3
        let fit = simple_ols(&[1.0, 2.0, 3.0], &[1.0, 4.0, 4.0]).unwrap();
        assert_relative_eq!(fit.slope, 1.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }

    #[test]
    fn ols_constant_regressor_uses_minimum_norm_solution() {
        let fit = simple_ols(&[0.1, 0.1, 0.1], &[1.0, 2.0, 6.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn ols_single_point() {
        let fit = simple_ols(&[5.0], &[7.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 7.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn ols_rejects_bad_input() {
        assert!(matches!(
            simple_ols(&[], &[]),
            Err(ForecastError::InsufficientData { .. })
        ));
        assert!(matches!(
            simple_ols(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
