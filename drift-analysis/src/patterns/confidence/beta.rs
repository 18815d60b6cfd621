//! Beta distribution posterior computation via `statrs` crate.
//!
//! Prior: Beta(1, 1) — uniform, no prior bias.
//! Posterior: Beta(1+k, 1+n-k) where k = successes, n = total observations.
//! Credible interval: 95% HDI via inverse CDF.

use statrs::distribution::{Beta, ContinuousCDF};

/// Beta distribution posterior computation.
pub struct BetaPosterior;

impl BetaPosterior {
    /// Compute posterior parameters from observations.
    ///
    /// `successes`: number of pattern matches (k).
    /// `total`: total observations (n).
    /// Returns (alpha, beta) for the posterior Beta distribution.
    ///
    /// Prior: Beta(1, 1) — uniform.
    /// Posterior: Beta(1 + k, 1 + n - k).
    pub fn posterior_params(successes: u64, total: u64) -> (f64, f64) {
        let k = successes as f64;
        let n = total as f64;
        let alpha = 1.0 + k;
        let beta = 1.0 + (n - k).max(0.0);
        (alpha, beta)
    }

    /// Compute posterior mean: alpha / (alpha + beta).
    ///
    /// Guards against division by zero.
    pub fn posterior_mean(alpha: f64, beta: f64) -> f64 {
        let sum = alpha + beta;
        if sum <= 0.0 || !sum.is_finite() {
            return 0.5; // Fallback to uniform
        }
        let mean = alpha / sum;
        if !mean.is_finite() {
            0.5
        } else {
            mean.clamp(0.0, 1.0)
        }
    }

    /// Compute posterior variance: alpha*beta / ((alpha+beta)^2 * (alpha+beta+1)).
    pub fn posterior_variance(alpha: f64, beta: f64) -> f64 {
        let sum = alpha + beta;
        if sum <= 0.0 || !sum.is_finite() {
            return 0.25; // Maximum variance for uniform
        }
        let denom = sum * sum * (sum + 1.0);
        if denom <= 0.0 || !denom.is_finite() {
            return 0.25;
        }
        let var = (alpha * beta) / denom;
        if !var.is_finite() {
            0.25
        } else {
            var.max(0.0)
        }
    }
}

/// Compute the credible interval for a Beta distribution.
///
/// Uses the inverse CDF (quantile function) to find the interval
/// that contains `level` probability mass (e.g., 0.95 for 95% CI).
///
/// Returns (low, high). Guards against invalid parameters.
pub fn credible_interval(alpha: f64, beta_param: f64, level: f64) -> (f64, f64) {
    // Guard against invalid parameters
    if alpha <= 0.0 || beta_param <= 0.0 || !alpha.is_finite() || !beta_param.is_finite() {
        return (0.0, 1.0);
    }

    // Guard against extreme values that would cause numerical issues
    if alpha > 1e6 || beta_param > 1e6 {
        let mean = alpha / (alpha + beta_param);
        let epsilon = 1e-6;
        return ((mean - epsilon).max(0.0), (mean + epsilon).min(1.0));
    }

    let tail = (1.0 - level) / 2.0;

    match Beta::new(alpha, beta_param) {
        Ok(dist) => {
            let low = dist.inverse_cdf(tail);
            let high = dist.inverse_cdf(1.0 - tail);

            // Guard against NaN/Inf from numerical issues
            let low = if low.is_finite() { low.clamp(0.0, 1.0) } else { 0.0 };
            let high = if high.is_finite() { high.clamp(0.0, 1.0) } else { 1.0 };

            (low, high)
        }
        Err(_) => (0.0, 1.0), // Fallback for invalid distribution
    }
}
