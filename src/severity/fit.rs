//! Maximum-likelihood fit of the shifted gamma severity model
//!
//! For a fixed location the gamma likelihood has a one-dimensional profile:
//! the shape solves `ln k - digamma(k) = ln(mean y) - mean(ln y)` with
//! `y = x - location`, and the scale is `mean(y) / k`. The location is then
//! chosen to maximize that profile over a bounded interval below the smallest
//! observation, by a grid scan followed by golden-section refinement.
//!
//! With shape below 1 the likelihood grows without bound as the location
//! approaches the sample minimum, so the search stops a small fraction of the
//! sample range short of it.

use super::gamma::{GammaParams, ShiftedGamma};
use crate::error::{ClaimsError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use statrs::function::gamma::{digamma, ln_gamma};

/// Number of candidate locations in the coarse scan
const GRID_POINTS: usize = 120;

/// Golden-section iterations after the scan
const REFINE_ITERATIONS: usize = 80;

/// Lowest candidate location, in sample ranges below the minimum
const LOCATION_SPAN: f64 = 3.0;

/// Gap kept between the highest candidate location and the minimum, as a share of the range
const LOCATION_GAP: f64 = 1e-4;

/// Bisection steps on ln(shape)
const SHAPE_ITERATIONS: usize = 100;

const LN_SHAPE_MIN: f64 = -20.0;
const LN_SHAPE_MAX: f64 = 20.0;

/// Result of a severity fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaFit {
    pub params: GammaParams,
    pub log_likelihood: f64,
    pub sample_size: usize,
    /// True when the location was supplied rather than estimated
    pub location_fixed: bool,
}

impl GammaFit {
    pub fn model(&self) -> Result<ShiftedGamma> {
        ShiftedGamma::from_params(self.params)
    }
}

/// Profile optimum for one candidate location
#[derive(Debug, Clone, Copy)]
struct Profile {
    location: f64,
    shape: f64,
    scale: f64,
    log_likelihood: f64,
}

/// Fit shape, location and scale to a sample of strictly positive severities.
///
/// `fixed_location` pins the location and estimates only shape and scale; it
/// must lie below the smallest observation.
pub fn fit_gamma(sample: &[f64], fixed_location: Option<f64>) -> Result<GammaFit> {
    if sample.is_empty() {
        return Err(ClaimsError::EmptySample);
    }
    if let Some(bad) = sample.iter().find(|x| !x.is_finite()) {
        return Err(ClaimsError::DegenerateSample(format!("non-finite observation {bad}")));
    }

    let (min, max) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let range = max - min;
    if sample.len() < 2 || range <= 0.0 {
        return Err(ClaimsError::DegenerateSample(format!(
            "{} observation(s) with {} distinct value(s)",
            sample.len(),
            if range > 0.0 { "several" } else { "one" }
        )));
    }

    let best = match fixed_location {
        Some(location) => {
            if location >= min {
                return Err(ClaimsError::DegenerateSample(format!(
                    "fixed location {location} is not below the smallest observation {min}"
                )));
            }
            profile(sample, location).ok_or_else(|| {
                ClaimsError::DegenerateSample(format!("no shape solution at location {location}"))
            })?
        }
        None => search_location(sample, min - LOCATION_SPAN * range, min - LOCATION_GAP * range)?,
    };

    debug!(
        "Gamma fit over {} points: shape {:.6}, location {:.3}, scale {:.3}, loglik {:.4}",
        sample.len(),
        best.shape,
        best.location,
        best.scale,
        best.log_likelihood
    );

    Ok(GammaFit {
        params: GammaParams {
            shape: best.shape,
            location: best.location,
            scale: best.scale,
        },
        log_likelihood: best.log_likelihood,
        sample_size: sample.len(),
        location_fixed: fixed_location.is_some(),
    })
}

/// Grid scan of the profile likelihood, refined around the best grid point
fn search_location(sample: &[f64], lower: f64, upper: f64) -> Result<Profile> {
    let step = (upper - lower) / (GRID_POINTS - 1) as f64;
    let grid: Vec<f64> = (0..GRID_POINTS).map(|i| lower + step * i as f64).collect();

    let mut best: Option<(usize, Profile)> = None;
    for (i, &location) in grid.iter().enumerate() {
        if let Some(candidate) = profile(sample, location) {
            if best.map_or(true, |(_, b)| candidate.log_likelihood > b.log_likelihood) {
                best = Some((i, candidate));
            }
        }
    }

    let (index, mut incumbent) = best.ok_or_else(|| {
        ClaimsError::DegenerateSample("profile likelihood undefined at every candidate location".to_string())
    })?;

    // Golden-section search on the bracket around the best grid point
    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let mut a = grid[index.saturating_sub(1)];
    let mut b = grid[(index + 1).min(GRID_POINTS - 1)];
    let objective = |location: f64| profile(sample, location).map_or(f64::NEG_INFINITY, |p| p.log_likelihood);

    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = objective(c);
    let mut fd = objective(d);
    for _ in 0..REFINE_ITERATIONS {
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = objective(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = objective(d);
        }
    }

    if let Some(refined) = profile(sample, 0.5 * (a + b)) {
        if refined.log_likelihood > incumbent.log_likelihood {
            incumbent = refined;
        }
    }
    Ok(incumbent)
}

/// Shape, scale and log-likelihood maximizing the likelihood at `location`
fn profile(sample: &[f64], location: f64) -> Option<Profile> {
    let n = sample.len() as f64;
    let mut sum_y = 0.0;
    let mut sum_ln_y = 0.0;
    for &x in sample {
        let y = x - location;
        if y <= 0.0 {
            return None;
        }
        sum_y += y;
        sum_ln_y += y.ln();
    }

    let mean_y = sum_y / n;
    let s = mean_y.ln() - sum_ln_y / n;
    if !(s.is_finite() && s > 0.0) {
        return None;
    }

    let shape = solve_shape(s);
    let scale = mean_y / shape;
    let log_likelihood = (shape - 1.0) * sum_ln_y - n * shape - n * ln_gamma(shape) - n * shape * scale.ln();

    log_likelihood.is_finite().then_some(Profile {
        location,
        shape,
        scale,
        log_likelihood,
    })
}

/// Solve `ln k - digamma(k) = s` for k; the left side decreases monotonically in k
fn solve_shape(s: f64) -> f64 {
    let mut low = LN_SHAPE_MIN;
    let mut high = LN_SHAPE_MAX;
    for _ in 0..SHAPE_ITERATIONS {
        let mid = 0.5 * (low + high);
        let k = mid.exp();
        if k.ln() - digamma(k) > s {
            low = mid;
        } else {
            high = mid;
        }
    }
    (0.5 * (low + high)).exp()
}
