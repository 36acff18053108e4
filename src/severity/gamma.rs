//! Three-parameter (shape, location, scale) gamma severity model

use crate::error::{ClaimsError, Result};
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Gamma};

/// Parameters of a location-shifted gamma distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaParams {
    pub shape: f64,
    pub location: f64,
    pub scale: f64,
}

/// Gamma distribution shifted by `location`: X = location + Y, Y ~ Gamma(shape, scale)
#[derive(Debug, Clone)]
pub struct ShiftedGamma {
    params: GammaParams,
    standard: Gamma,
}

impl ShiftedGamma {
    pub fn new(shape: f64, location: f64, scale: f64) -> Result<Self> {
        if !(shape.is_finite() && shape > 0.0) {
            return Err(ClaimsError::Distribution(format!("gamma shape must be positive, got {shape}")));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ClaimsError::Distribution(format!("gamma scale must be positive, got {scale}")));
        }
        if !location.is_finite() {
            return Err(ClaimsError::Distribution(format!("gamma location must be finite, got {location}")));
        }

        // statrs parameterizes by rate
        let standard = Gamma::new(shape, 1.0 / scale).map_err(|e| ClaimsError::Distribution(e.to_string()))?;

        Ok(Self {
            params: GammaParams { shape, location, scale },
            standard,
        })
    }

    pub fn from_params(params: GammaParams) -> Result<Self> {
        Self::new(params.shape, params.location, params.scale)
    }

    pub fn params(&self) -> GammaParams {
        self.params
    }

    pub fn shape(&self) -> f64 {
        self.params.shape
    }

    pub fn location(&self) -> f64 {
        self.params.location
    }

    pub fn scale(&self) -> f64 {
        self.params.scale
    }

    pub fn mean(&self) -> f64 {
        self.params.location + self.params.shape * self.params.scale
    }

    pub fn pdf(&self, x: f64) -> f64 {
        let y = x - self.params.location;
        if y <= 0.0 {
            return 0.0;
        }
        self.standard.pdf(y)
    }

    pub fn ln_pdf(&self, x: f64) -> f64 {
        let y = x - self.params.location;
        if y <= 0.0 {
            return f64::NEG_INFINITY;
        }
        self.standard.ln_pdf(y)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        let y = x - self.params.location;
        if y <= 0.0 {
            return 0.0;
        }
        self.standard.cdf(y)
    }

    /// P(X > x)
    pub fn sf(&self, x: f64) -> f64 {
        let y = x - self.params.location;
        if y <= 0.0 {
            return 1.0;
        }
        self.standard.sf(y)
    }

    /// Inverse CDF by bracketing and bisection
    pub fn ppf(&self, p: f64) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(ClaimsError::InvalidProbability(p));
        }

        let mut low = 0.0;
        let mut high = self.params.scale * self.params.shape.max(1.0);
        let mut expansions = 0;
        while self.standard.cdf(high) < p {
            low = high;
            high *= 2.0;
            expansions += 1;
            if expansions > 1_100 {
                return Err(ClaimsError::Distribution(format!("no finite quantile found for p = {p}")));
            }
        }

        for _ in 0..200 {
            let mid = 0.5 * (low + high);
            if self.standard.cdf(mid) < p {
                low = mid;
            } else {
                high = mid;
            }
            if high - low <= 1e-12 * high.max(1.0) {
                break;
            }
        }

        Ok(self.params.location + 0.5 * (low + high))
    }

    /// Sum of log densities; `-inf` when any point is outside the support
    pub fn log_likelihood(&self, sample: &[f64]) -> f64 {
        sample.iter().map(|&x| self.ln_pdf(x)).sum()
    }

    /// Sampler for the unshifted part, for callers that draw in bulk
    pub fn sampler(&self) -> Result<rand_distr::Gamma<f64>> {
        rand_distr::Gamma::new(self.params.shape, self.params.scale)
            .map_err(|e| ClaimsError::Distribution(e.to_string()))
    }

    /// Draw `n` values
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        let sampler = self.sampler()?;
        Ok((0..n).map(|_| self.params.location + sampler.sample(rng)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_exponential_special_case() {
        // shape 1 is an exponential shifted by the location
        let model = ShiftedGamma::new(1.0, 300.0, 10_000.0).unwrap();
        let x = 300.0 + 10_000.0 * 2.0_f64.ln();
        assert_relative_eq!(model.cdf(x), 0.5, epsilon = 1e-10);
        assert_relative_eq!(model.sf(x), 0.5, epsilon = 1e-10);
        assert_relative_eq!(model.pdf(300.0 + 1e-9), 1e-4, max_relative = 1e-6);
        assert_relative_eq!(model.mean(), 10_300.0);
    }

    #[test]
    fn test_outside_support() {
        let model = ShiftedGamma::new(0.9, 315.0, 14_000.0).unwrap();
        assert_eq!(model.cdf(100.0), 0.0);
        assert_eq!(model.sf(-5.0), 1.0);
        assert_eq!(model.pdf(315.0), 0.0);
        assert_eq!(model.ln_pdf(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_ppf_inverts_cdf() {
        let model = ShiftedGamma::new(0.87, 412.0, 15_300.0).unwrap();
        for p in [0.01, 0.25, 0.5, 0.75, 0.9, 0.999] {
            let x = model.ppf(p).unwrap();
            assert_relative_eq!(model.cdf(x), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ppf_rejects_bounds() {
        let model = ShiftedGamma::new(2.0, 0.0, 1.0).unwrap();
        assert!(matches!(model.ppf(0.0), Err(ClaimsError::InvalidProbability(_))));
        assert!(matches!(model.ppf(1.0), Err(ClaimsError::InvalidProbability(_))));
        assert!(model.ppf(f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_bad_params() {
        assert!(ShiftedGamma::new(0.0, 0.0, 1.0).is_err());
        assert!(ShiftedGamma::new(1.0, 0.0, -1.0).is_err());
        assert!(ShiftedGamma::new(1.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_sample_mean() {
        let model = ShiftedGamma::new(2.0, 100.0, 50.0).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let draws = model.sample(&mut rng, 20_000).unwrap();
        assert!(draws.iter().all(|&x| x > 100.0));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert_relative_eq!(mean, 200.0, max_relative = 0.03);
    }
}
