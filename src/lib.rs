//! Claims Analytics - synthetic motor claims book and gamma severity risk estimation
//!
//! This library provides:
//! - Seeded generation of a multi-year claims book (growing exposure,
//!   liability split, inflating gamma severities)
//! - Two-table CSV persistence (Summary and Claims, related by year)
//! - Inflation restatement and a maximum-likelihood shifted-gamma fit
//! - Kolmogorov-Smirnov diagnostics, exceedance probabilities, cost quantiles
//!   and premium adequacy

pub mod config;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod generator;
pub mod inflation;
pub mod pipeline;
pub mod severity;

// Re-export commonly used types
pub use config::{AnalyticsConfig, Band, EstimatorConfig, GeneratorConfig};
pub use dataset::{ClaimRecord, ClaimsDataset, YearRecord};
pub use error::{ClaimsError, Result};
pub use estimator::{EstimatorReport, SeverityEstimator};
pub use generator::{ClaimsGenerator, DrawStep, GeneratedBook};
pub use pipeline::Pipeline;
pub use severity::{GammaFit, GammaParams, ShiftedGamma};
