//! Tunable parameters for the generator and the estimator
//!
//! Every field has a default matching the reference scenario, so a partial
//! JSON file only needs to name what it overrides:
//!
//! ```json
//! { "generator": { "seed": 7, "max_cars": 140 }, "estimator": { "premium": 500000.0 } }
//! ```

use crate::error::{ClaimsError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default directory holding the two persisted tables
pub const DEFAULT_DATASET_DIR: &str = "synthetic_insurance_claims";

/// Closed interval `[low, high]` a per-year parameter is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ClaimsError::InvalidConfig(format!("{name} band must be finite")));
        }
        if self.low > self.high {
            return Err(ClaimsError::InvalidConfig(format!(
                "{name} band is inverted: [{}, {}]",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Parameters of the synthetic claims book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the ChaCha20 generator
    pub seed: u64,

    /// First covered year (also the base year for severity inflation)
    pub first_year: i32,

    /// Last covered year, inclusive
    pub last_year: i32,

    /// Lower bound of the first year's insured-car draw
    pub min_cars: u32,

    /// Ceiling on insured cars in any year
    pub max_cars: u32,

    /// Yearly severity inflation applied to the scale
    pub inflation: f64,

    /// Claims per insured car
    pub claim_frequency: Band,

    /// Share of claims that are non-liable (cost exactly 0)
    pub non_liable_ratio: Band,

    /// Gamma shape of liable severities
    pub severity_shape: Band,

    /// Gamma location offset of liable severities
    pub severity_location: f64,

    /// Gamma scale of liable severities, before inflation
    pub severity_scale: Band,

    /// Clip liable draws that come out negative to zero instead of keeping them
    pub clip_negative_severity: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            first_year: 2020,
            last_year: 2024,
            min_cars: 85,
            max_cars: 115,
            inflation: 0.03,
            claim_frequency: Band::new(0.32, 0.38),
            non_liable_ratio: Band::new(0.45, 0.52),
            severity_shape: Band::new(0.8, 1.0),
            severity_location: 315.0,
            severity_scale: Band::new(13_500.0, 14_500.0),
            clip_negative_severity: false,
        }
    }
}

impl GeneratorConfig {
    /// Covered years in ascending order
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year..=self.last_year
    }

    pub fn year_count(&self) -> usize {
        (self.last_year - self.first_year + 1).max(0) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_year > self.last_year {
            return Err(ClaimsError::InvalidConfig(format!(
                "year range {}..={} is empty",
                self.first_year, self.last_year
            )));
        }
        if self.min_cars > self.max_cars {
            return Err(ClaimsError::InvalidConfig(format!(
                "min_cars {} exceeds max_cars {}",
                self.min_cars, self.max_cars
            )));
        }
        if !self.inflation.is_finite() || self.inflation <= -1.0 {
            return Err(ClaimsError::InvalidConfig(format!("inflation {} is not usable", self.inflation)));
        }
        if !self.severity_location.is_finite() {
            return Err(ClaimsError::InvalidConfig("severity_location must be finite".to_string()));
        }

        self.claim_frequency.validate("claim_frequency")?;
        self.non_liable_ratio.validate("non_liable_ratio")?;
        self.severity_shape.validate("severity_shape")?;
        self.severity_scale.validate("severity_scale")?;

        if self.claim_frequency.low < 0.0 {
            return Err(ClaimsError::InvalidConfig("claim_frequency must be non-negative".to_string()));
        }
        if self.non_liable_ratio.low < 0.0 || self.non_liable_ratio.high > 1.0 {
            return Err(ClaimsError::InvalidConfig("non_liable_ratio must lie within [0, 1]".to_string()));
        }
        if self.severity_shape.low <= 0.0 {
            return Err(ClaimsError::InvalidConfig("severity_shape must be positive".to_string()));
        }
        if self.severity_scale.low <= 0.0 {
            return Err(ClaimsError::InvalidConfig("severity_scale must be positive".to_string()));
        }
        Ok(())
    }
}

/// Parameters of the severity model and the risk metrics derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Year all costs are restated to
    pub reference_year: i32,

    /// Yearly inflation used for restatement
    pub inflation: f64,

    /// Cost thresholds for exceedance probabilities
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<f64>,

    /// Exceedance probabilities to invert into cost quantiles
    #[serde(default = "default_exceedance_levels")]
    pub exceedance_levels: Vec<f64>,

    /// Premium charged for the portfolio
    pub premium: f64,

    /// Profit/loss margin of interest
    pub margin: f64,

    /// Portfolio-size divisor turning a portfolio amount into a per-claim cost
    pub portfolio_units: f64,

    /// Loading factor applied together with `portfolio_units`
    pub loading_factor: f64,

    /// Decimals kept on premium-adequacy probabilities before scaling to percent
    pub probability_decimals: u32,

    /// Bins of the severity histogram
    pub histogram_bins: usize,

    /// Divisor applied to histogram counts so they sit on the density's scale
    pub histogram_display_divisor: f64,

    /// Fix the gamma location instead of estimating it
    pub fixed_location: Option<f64>,
}

fn default_thresholds() -> Vec<f64> {
    (0..8).map(|i| 20_000.0 + 5_000.0 * i as f64).collect()
}

fn default_exceedance_levels() -> Vec<f64> {
    vec![0.25, 0.20, 0.10]
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            reference_year: 2025,
            inflation: 0.03,
            thresholds: default_thresholds(),
            exceedance_levels: default_exceedance_levels(),
            premium: 475_000.0,
            margin: 100_000.0,
            // ~40 claims a year, 53% of them liable
            portfolio_units: 40.0,
            loading_factor: 0.53,
            probability_decimals: 4,
            histogram_bins: 60,
            histogram_display_divisor: 100.0,
            fixed_location: None,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.inflation.is_finite() || self.inflation <= -1.0 {
            return Err(ClaimsError::InvalidConfig(format!("inflation {} is not usable", self.inflation)));
        }
        if self.portfolio_units <= 0.0 || self.loading_factor <= 0.0 {
            return Err(ClaimsError::InvalidConfig(
                "portfolio_units and loading_factor must be positive".to_string(),
            ));
        }
        if let Some(level) = self.exceedance_levels.iter().find(|p| !(**p > 0.0 && **p < 1.0)) {
            return Err(ClaimsError::InvalidProbability(*level));
        }
        if self.histogram_bins == 0 {
            return Err(ClaimsError::InvalidConfig("histogram_bins must be at least 1".to_string()));
        }
        if self.histogram_display_divisor <= 0.0 {
            return Err(ClaimsError::InvalidConfig("histogram_display_divisor must be positive".to_string()));
        }
        if let Some(loc) = self.fixed_location {
            if !loc.is_finite() {
                return Err(ClaimsError::InvalidConfig("fixed_location must be finite".to_string()));
            }
        }
        Ok(())
    }
}

/// Configuration of the whole generate-then-analyze pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub generator: GeneratorConfig,
    pub estimator: EstimatorConfig,
}

impl AnalyticsConfig {
    /// Load a (possibly partial) JSON config file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.estimator.validate()
    }
}
