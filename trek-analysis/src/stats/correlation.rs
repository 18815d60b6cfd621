//! Correlation kernels: Pearson, Spearman with Student-t p-values, and
//! the supporting rank/moment helpers.
//!
//! Degenerate input (fewer than two observations, constant series) yields
//! NaN coefficients rather than errors; callers decide whether NaN rows
//! are kept (aggregation tables) or mapped to sentinels (scorers).

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample covariance (ddof = 1); NaN when fewer than two observations.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let sum: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - mx) * (b - my))
        .sum();
    sum / (n - 1) as f64
}

/// Pearson correlation coefficient; NaN when either series is constant or
/// has fewer than two observations.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

/// 1-based ranks with ties resolved to the average rank.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j share the same value; average their 1-based ranks.
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg;
        }
        i = j + 1;
    }

    ranks
}

/// Spearman rank correlation with a two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpearmanResult {
    pub rho: f64,
    pub p_value: f64,
}

/// Spearman rank correlation: Pearson over average ranks, p-value from the
/// Student-t transform.
pub fn spearman(x: &[f64], y: &[f64]) -> SpearmanResult {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return SpearmanResult {
            rho: f64::NAN,
            p_value: f64::NAN,
        };
    }

    let rho = pearson(&average_ranks(x), &average_ranks(y));
    let p_value = two_sided_p(rho, n);
    SpearmanResult { rho, p_value }
}

/// Two-sided p-value for a correlation coefficient over `n` observations
/// via `t = r * sqrt((n-2) / (1-r^2))` with `n-2` degrees of freedom.
fn two_sided_p(r: f64, n: usize) -> f64 {
    if r.is_nan() {
        return f64::NAN;
    }
    if n <= 2 {
        // Two points always correlate perfectly; no evidence either way.
        return 1.0;
    }
    let r2 = r * r;
    if r2 >= 1.0 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r.abs() * (df / (1.0 - r2)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t))).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

/// Z-score normalization over the population standard deviation.
/// A constant series yields NaN entries, matching the convention of the
/// correlation kernels.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>()
        / values.len().max(1) as f64;
    let std = variance.sqrt();
    values
        .iter()
        .map(|v| {
            if std > 0.0 {
                (v - m) / std
            } else {
                f64::NAN
            }
        })
        .collect()
}
