//! Bounded Nelder-Mead simplex used for conditional maximum likelihood.

use std::cmp::Ordering;

/// Result of a Nelder-Mead run.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    pub optimal_point: Vec<f64>,
    pub optimal_value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    pub max_iter: usize,
    /// Relative tolerance on the spread of objective values and on simplex size.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrink coefficient.
    pub sigma: f64,
    /// Initial simplex step, absolute for zero coordinates and relative otherwise.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tolerance: 1e-10,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// Minimize `objective` starting from `initial`, clamping every vertex into `bounds`.
///
/// Convergence is declared when the objective spread across the simplex, or
/// the simplex diameter, falls below `tolerance` relative to the magnitude of
/// the best value (respectively the centroid).
///
/// # Example
/// ```
/// use revenue_forecast::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     &NelderMeadConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.optimal_point[0] - 2.0).abs() < 1e-3);
/// assert!((result.optimal_point[1] + 1.0).abs() < 1e-3);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: &NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |point: Vec<f64>| -> Vec<f64> {
        match bounds {
            None => point,
            Some(b) => point
                .into_iter()
                .enumerate()
                .map(|(i, x)| b.get(i).map_or(x, |&(lo, hi)| x.clamp(lo, hi)))
                .collect(),
        }
    };
    // NaN objective values sort last so they are replaced first.
    let eval = |point: &[f64]| {
        let v = objective(point);
        if v.is_nan() {
            f64::INFINITY
        } else {
            v
        }
    };

    let start = clamp(initial.to_vec());
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(start.clone());
    for i in 0..dim {
        let mut vertex = start.clone();
        vertex[i] += if start[i].abs() > 1e-10 {
            config.initial_step * start[i].abs()
        } else {
            config.initial_step
        };
        let mut vertex = clamp(vertex);
        if vertex[i] == start[i] {
            // Starting on an upper bound; step inward instead.
            vertex[i] -= config.initial_step;
            vertex = clamp(vertex);
        }
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| eval(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let mut order: Vec<usize> = (0..=dim).collect();
        order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
        let best = order[0];
        let worst = order[dim];
        let second_worst = order[dim - 1];

        let centroid = centroid_excluding(&simplex, worst);

        let spread = values[worst] - values[best];
        if spread.is_finite() && spread <= config.tolerance * (1.0 + values[best].abs()) {
            converged = true;
            break;
        }
        let diameter = simplex
            .iter()
            .map(|v| distance(v, &centroid))
            .fold(0.0, f64::max);
        if diameter <= config.tolerance * (1.0 + norm(&centroid)) {
            converged = values[best].is_finite();
            break;
        }

        let reflected = clamp(affine(&centroid, &simplex[worst], -config.alpha));
        let reflected_value = eval(&reflected);

        if reflected_value < values[best] {
            let expanded = clamp(affine(&centroid, &reflected, config.gamma));
            let expanded_value = eval(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        let (contracted, threshold) = if reflected_value < values[worst] {
            (
                clamp(affine(&centroid, &reflected, config.rho)),
                reflected_value,
            )
        } else {
            (
                clamp(affine(&centroid, &simplex[worst], config.rho)),
                values[worst],
            )
        };
        let contracted_value = eval(&contracted);
        if contracted_value < threshold {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        let anchor = simplex[best].clone();
        for i in 0..=dim {
            if i == best {
                continue;
            }
            simplex[i] = clamp(affine(&anchor, &simplex[i], config.sigma));
            values[i] = eval(&simplex[i]);
        }
    }

    let best = (0..=dim)
        .min_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal))
        .unwrap_or(0);

    NelderMeadResult {
        optimal_point: simplex[best].clone(),
        optimal_value: values[best],
        iterations,
        converged,
    }
}

/// `origin + t * (point - origin)`.
fn affine(origin: &[f64], point: &[f64], t: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point.iter())
        .map(|(o, p)| o + t * (p - o))
        .collect()
}

fn centroid_excluding(simplex: &[Vec<f64>], exclude: usize) -> Vec<f64> {
    let dim = simplex[0].len();
    let count = (simplex.len() - 1) as f64;
    let mut centroid = vec![0.0; dim];
    for (_, vertex) in simplex.iter().enumerate().filter(|(i, _)| *i != exclude) {
        for (c, v) in centroid.iter_mut().zip(vertex.iter()) {
            *c += v;
        }
    }
    centroid.iter_mut().for_each(|c| *c /= count);
    centroid
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}
