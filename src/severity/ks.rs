//! One-sample Kolmogorov-Smirnov goodness-of-fit test

use crate::error::{ClaimsError, Result};
use serde::{Deserialize, Serialize};

/// Outcome of a KS test; informational only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsTest {
    pub statistic: f64,
    pub p_value: f64,
    pub sample_size: usize,
}

/// Compare the empirical distribution of `sample` with `cdf`.
///
/// The p-value uses the asymptotic Kolmogorov distribution with Stephens'
/// small-sample correction.
pub fn ks_test<F>(sample: &[f64], cdf: F) -> Result<KsTest>
where
    F: Fn(f64) -> f64,
{
    if sample.is_empty() {
        return Err(ClaimsError::EmptySample);
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let statistic = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let below = f - i as f64 / n;
            let above = (i + 1) as f64 / n - f;
            below.max(above)
        })
        .fold(0.0, f64::max);

    let root_n = n.sqrt();
    let lambda = (root_n + 0.12 + 0.11 / root_n) * statistic;

    Ok(KsTest {
        statistic,
        p_value: kolmogorov_sf(lambda),
        sample_size: sorted.len(),
    })
}

/// Survival function of the Kolmogorov distribution, Q(lambda)
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    let q = if lambda < 1.18 {
        // Small-lambda series for the CDF converges fast here
        let y = (-std::f64::consts::PI.powi(2) / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * std::f64::consts::PI).sqrt() / lambda * (y + y.powi(9) + y.powi(25) + y.powi(49));
        1.0 - cdf
    } else {
        let x = (-2.0 * lambda * lambda).exp();
        2.0 * (x - x.powi(4) + x.powi(9))
    };

    q.clamp(0.0, 1.0)
}
