//! Differencing and integration for the I(d) part of ARIMA.

/// Apply `d`-th order differencing.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            return Vec::new();
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Undo `d`-th order differencing for values that continue `original`.
///
/// Each level is anchored on the last value of the corresponding
/// intermediate difference of `original`.
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let anchor = difference(original, level).last().copied().unwrap_or(0.0);
        result = result
            .iter()
            .scan(anchor, |acc, &step| {
                *acc += step;
                Some(*acc)
            })
            .collect();
    }
    result
}

/// Coefficients of the AR polynomial after folding in `(1 - B)^d`.
///
/// Returns `phi*` such that `y_t = sum_k phi*_k y_{t-k} + ...` on the
/// original scale; its length is `ar.len() + d`.
pub fn integrated_ar(ar: &[f64], d: usize) -> Vec<f64> {
    // poly[k] is the coefficient of B^k in phi(B) = 1 - sum ar_i B^i
    let mut poly: Vec<f64> = std::iter::once(1.0)
        .chain(ar.iter().map(|a| -a))
        .collect();
    for _ in 0..d {
        let mut next = vec![0.0; poly.len() + 1];
        for (k, c) in poly.iter().enumerate() {
            next[k] += c;
            next[k + 1] -= c;
        }
        poly = next;
    }
    poly.iter().skip(1).map(|c| -c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_order_0() {
        let series = vec![1.0, 2.0, 3.0];
        assert_eq!(difference(&series, 0), series);
    }

    #[test]
    fn difference_order_1_and_2() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&series, 1), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(difference(&series, 2), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn difference_too_short() {
        assert!(difference(&[1.0], 1).is_empty());
        assert!(difference(&[], 1).is_empty());
    }

    #[test]
    fn integrate_continues_from_last_value() {
        let original = vec![10.0, 12.0, 15.0, 19.0, 24.0];
        let integrated = integrate(&[6.0, 7.0], &original, 1);

        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_order_2_continues_quadratic() {
        // Second differences of n^2 are constant 2
        let original: Vec<f64> = (0..6).map(|i| (i * i) as f64).collect();
        let integrated = integrate(&[2.0, 2.0], &original, 2);

        assert_relative_eq!(integrated[0], 36.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 49.0, epsilon = 1e-10);
    }

    #[test]
    fn integrated_ar_folds_differencing() {
        assert_eq!(integrated_ar(&[0.5], 0), vec![0.5]);
        // (1 - 0.5B)(1 - B) = 1 - 1.5B + 0.5B^2
        let folded = integrated_ar(&[0.5], 1);
        assert_relative_eq!(folded[0], 1.5, epsilon = 1e-12);
        assert_relative_eq!(folded[1], -0.5, epsilon = 1e-12);
        // Pure random walk
        assert_eq!(integrated_ar(&[], 1), vec![1.0]);
    }
}
