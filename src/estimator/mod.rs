//! Severity model estimation and risk metrics

mod engine;
mod normalize;
mod report;
pub mod risk;

pub use engine::SeverityEstimator;
pub use normalize::{adjust_claims, fit_sample, yearly_view, AdjustedClaim, YearlyView};
pub use report::EstimatorReport;
pub use risk::{
    cost_quantiles, exceedance_probabilities, premium_adequacy, CostQuantile, Exceedance, PremiumAdequacy,
};
