//! Severity estimator: restate, fit, validate, derive risk metrics

use super::normalize::{adjust_claims, fit_sample, yearly_view};
use super::report::EstimatorReport;
use super::risk::{cost_quantiles, exceedance_probabilities, premium_adequacy};
use crate::config::EstimatorConfig;
use crate::dataset::ClaimsDataset;
use crate::error::{ClaimsError, Result};
use crate::severity::{fit_gamma, histogram, ks_test, SampleSummary};
use log::info;

/// Fits the severity model to a claims dataset and derives risk metrics.
///
/// Holds no state besides its configuration; estimating the same dataset
/// twice gives identical reports.
#[derive(Debug, Clone)]
pub struct SeverityEstimator {
    config: EstimatorConfig,
}

impl SeverityEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn estimate(&self, dataset: &ClaimsDataset) -> Result<EstimatorReport> {
        let cfg = &self.config;

        let adjusted = adjust_claims(dataset, cfg.inflation, cfg.reference_year);
        let yearly = yearly_view(dataset, &adjusted);
        let sample = fit_sample(&adjusted);
        let description = SampleSummary::from_sample(&sample).ok_or(ClaimsError::EmptySample)?;

        let fit = fit_gamma(&sample, cfg.fixed_location)?;
        let model = fit.model()?;
        info!(
            "Fitted gamma to {} adjusted costs: shape {:.4}, location {:.2}, scale {:.2}",
            fit.sample_size, fit.params.shape, fit.params.location, fit.params.scale
        );

        let goodness_of_fit = ks_test(&sample, |x| model.cdf(x))?;
        info!(
            "KS statistic {:.4}, p-value {:.4}",
            goodness_of_fit.statistic, goodness_of_fit.p_value
        );

        Ok(EstimatorReport {
            reference_year: cfg.reference_year,
            summary: dataset.summary.clone(),
            yearly,
            sample: description,
            exceedances: exceedance_probabilities(&model, &cfg.thresholds),
            quantiles: cost_quantiles(&model, &cfg.exceedance_levels)?,
            premium: premium_adequacy(&model, cfg),
            histogram: histogram(&sample, cfg.histogram_bins, cfg.histogram_display_divisor, &model),
            fit,
            goodness_of_fit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::dataset::{ClaimRecord, YearRecord};
    use crate::generator::ClaimsGenerator;
    use chrono::NaiveDate;

    fn generated() -> ClaimsDataset {
        ClaimsGenerator::new(GeneratorConfig::default())
            .unwrap()
            .generate_seeded()
            .unwrap()
            .dataset
    }

    #[test]
    fn test_estimate_reference_book() {
        let dataset = generated();
        let report = SeverityEstimator::new(EstimatorConfig::default())
            .unwrap()
            .estimate(&dataset)
            .unwrap();

        assert_eq!(report.yearly.len(), 5);
        assert_eq!(
            report.yearly.iter().map(|y| y.liable_claims).sum::<usize>(),
            dataset.liable_count()
        );
        assert_eq!(report.sample.count, dataset.liable_count());
        assert_eq!(report.fit.sample_size, dataset.liable_count());
        assert!(report.fit.params.location < report.sample.min);
        assert!(report.fit.params.shape > 0.0 && report.fit.params.scale > 0.0);

        assert_eq!(report.exceedances.len(), 8);
        assert!(report.exceedances.windows(2).all(|w| w[0].probability >= w[1].probability));
        assert_eq!(report.quantiles.len(), 3);
        assert!(report.quantiles.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert_eq!(report.histogram.len(), 60);
        assert_eq!(report.histogram.iter().map(|b| b.count).sum::<usize>(), report.sample.count);
        assert!((0.0..=1.0).contains(&report.goodness_of_fit.p_value));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let dataset = generated();
        let estimator = SeverityEstimator::new(EstimatorConfig::default()).unwrap();
        assert_eq!(estimator.estimate(&dataset).unwrap(), estimator.estimate(&dataset).unwrap());
    }

    #[test]
    fn test_no_liable_claims_is_empty_sample() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 3).unwrap();
        let claims = vec![ClaimRecord::new(date, 2021, 0.0), ClaimRecord::new(date, 2021, 0.0)];
        let dataset = ClaimsDataset {
            summary: vec![YearRecord::from_claims(2021, 90, &claims)],
            claims,
        };

        let err = SeverityEstimator::new(EstimatorConfig::default())
            .unwrap()
            .estimate(&dataset)
            .unwrap_err();
        assert!(matches!(err, ClaimsError::EmptySample));
    }

    #[test]
    fn test_fixed_location_is_honoured() {
        let config = EstimatorConfig {
            fixed_location: Some(0.0),
            ..EstimatorConfig::default()
        };
        let report = SeverityEstimator::new(config).unwrap().estimate(&generated()).unwrap();
        assert!(report.fit.location_fixed);
        assert_eq!(report.fit.params.location, 0.0);
    }

    #[test]
    fn test_report_renders() {
        let report = SeverityEstimator::new(EstimatorConfig::default())
            .unwrap()
            .estimate(&generated())
            .unwrap();

        let text = report.render();
        assert!(text.contains("Probability of average cost exceeding 20000"));
        assert!(text.contains("25% probability of average cost exceeding"));
        assert!(text.contains("chance of a profit of 100000 or more with premium at 475000"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"goodness_of_fit\""));
    }
}
