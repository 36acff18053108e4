//! Exceedance probabilities, cost quantiles and premium adequacy under a fitted model

use crate::config::EstimatorConfig;
use crate::error::Result;
use crate::severity::ShiftedGamma;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exceedance {
    pub threshold: f64,
    /// P(cost > threshold)
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostQuantile {
    /// Probability of exceeding `cost`
    pub exceedance: f64,
    /// Rounded to whole units
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumAdequacy {
    pub premium: f64,
    pub margin: f64,
    /// Average claim cost at or below which the premium yields the margin as profit
    pub profit_cost_threshold: f64,
    /// Average claim cost above which the premium falls short by the margin
    pub loss_cost_threshold: f64,
    /// Percent, from the probability rounded to the configured decimals
    pub profit_probability_pct: f64,
    pub loss_probability_pct: f64,
}

/// `1 - CDF(t)` for each threshold
pub fn exceedance_probabilities(model: &ShiftedGamma, thresholds: &[f64]) -> Vec<Exceedance> {
    thresholds
        .iter()
        .map(|&threshold| {
            if threshold <= model.location() {
                warn!(
                    "Threshold {} lies below the fitted location {:.2}; exceedance is certain",
                    threshold,
                    model.location()
                );
            }
            Exceedance {
                threshold,
                probability: model.sf(threshold),
            }
        })
        .collect()
}

/// Cost exceeded with each given probability, i.e. the `1 - p` quantile
pub fn cost_quantiles(model: &ShiftedGamma, exceedance_levels: &[f64]) -> Result<Vec<CostQuantile>> {
    exceedance_levels
        .iter()
        .map(|&exceedance| {
            let cost = model.ppf(1.0 - exceedance)?.round();
            Ok(CostQuantile { exceedance, cost })
        })
        .collect()
}

/// Chance that the premium covers the portfolio with the margin to spare, and
/// chance it falls short by the margin.
///
/// Portfolio amounts become per-claim cost thresholds by dividing by
/// `portfolio_units * loading_factor`.
pub fn premium_adequacy(model: &ShiftedGamma, config: &EstimatorConfig) -> PremiumAdequacy {
    let divisor = config.portfolio_units * config.loading_factor;
    let profit_cost_threshold = (config.premium - config.margin) / divisor;
    let loss_cost_threshold = (config.premium + config.margin) / divisor;

    let profit = round_to(model.cdf(profit_cost_threshold), config.probability_decimals);
    let loss = round_to(model.sf(loss_cost_threshold), config.probability_decimals);

    PremiumAdequacy {
        premium: config.premium,
        margin: config.margin,
        profit_cost_threshold,
        loss_cost_threshold,
        profit_probability_pct: 100.0 * profit,
        loss_probability_pct: 100.0 * loss,
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn model() -> ShiftedGamma {
        ShiftedGamma::new(0.9, 330.0, 15_800.0).unwrap()
    }

    #[test]
    fn test_exceedance_of_exponential() {
        let model = ShiftedGamma::new(1.0, 0.0, 10_000.0).unwrap();
        let result = exceedance_probabilities(&model, &[10_000.0, 20_000.0]);
        assert_relative_eq!(result[0].probability, (-1.0_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(result[1].probability, (-2.0_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_below_support() {
        let result = exceedance_probabilities(&model(), &[100.0]);
        assert_eq!(result[0].probability, 1.0);
    }

    #[test]
    fn test_quantiles_ordered_and_consistent() {
        let model = model();
        let quantiles = cost_quantiles(&model, &[0.25, 0.20, 0.10]).unwrap();
        assert_eq!(quantiles.len(), 3);
        assert!(quantiles[0].cost < quantiles[1].cost && quantiles[1].cost < quantiles[2].cost);

        for q in &quantiles {
            assert_eq!(q.cost, q.cost.round());
            // rounding to a whole unit moves the exceedance by at most pdf * 0.5
            assert_abs_diff_eq!(model.sf(q.cost), q.exceedance, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_quantile_rejects_bad_level() {
        assert!(cost_quantiles(&model(), &[0.0]).is_err());
        assert!(cost_quantiles(&model(), &[1.5]).is_err());
    }

    #[test]
    fn test_premium_adequacy_thresholds() {
        let config = EstimatorConfig::default();
        let result = premium_adequacy(&model(), &config);

        assert_relative_eq!(result.profit_cost_threshold, 375_000.0 / 21.2);
        assert_relative_eq!(result.loss_cost_threshold, 575_000.0 / 21.2);
        assert!(result.profit_probability_pct + result.loss_probability_pct <= 100.0 + 1e-9);
        assert!(result.profit_probability_pct > 0.0 && result.loss_probability_pct > 0.0);

        // two decimals of percent
        let scaled = result.profit_probability_pct * 100.0;
        assert_abs_diff_eq!(scaled, scaled.round(), epsilon = 1e-6);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123_456, 4), 0.1235);
        assert_eq!(round_to(0.5, 0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_exceedance_is_monotone(
            shape in 0.3f64..5.0,
            location in -1_000.0f64..2_000.0,
            scale in 100.0f64..50_000.0,
            t1 in -5_000.0f64..200_000.0,
            gap in 0.0f64..100_000.0,
        ) {
            let model = ShiftedGamma::new(shape, location, scale).unwrap();
            let result = exceedance_probabilities(&model, &[t1, t1 + gap]);
            prop_assert!(result[0].probability >= result[1].probability);
        }

        #[test]
        fn prop_quantile_round_trip(
            shape in 0.5f64..3.0,
            scale in 1_000.0f64..30_000.0,
            exceedance in 0.01f64..0.99,
        ) {
            let model = ShiftedGamma::new(shape, 315.0, scale).unwrap();
            let cost = model.ppf(1.0 - exceedance).unwrap();
            prop_assert!((model.sf(cost) - exceedance).abs() < 1e-8);
        }
    }
}
