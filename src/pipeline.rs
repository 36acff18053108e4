//! Generate-then-analyze pipeline with the dataset directory as hand-off
//!
//! # Example
//! ```ignore
//! let pipeline = Pipeline::new(AnalyticsConfig::default())?;
//! let (book, report) = pipeline.run("synthetic_insurance_claims")?;
//! println!("{}", report.render());
//! ```

use crate::config::AnalyticsConfig;
use crate::dataset::{load_dataset, write_dataset};
use crate::error::Result;
use crate::estimator::{EstimatorReport, SeverityEstimator};
use crate::generator::{ClaimsGenerator, GeneratedBook};
use log::warn;
use std::path::Path;

/// Validated generator and estimator sharing one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    generator: ClaimsGenerator,
    estimator: SeverityEstimator,
}

impl Pipeline {
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        if config.generator.inflation != config.estimator.inflation {
            warn!(
                "Generator inflation {} differs from estimator inflation {}; adjusted costs will not be in constant money",
                config.generator.inflation, config.estimator.inflation
            );
        }

        Ok(Self {
            generator: ClaimsGenerator::new(config.generator)?,
            estimator: SeverityEstimator::new(config.estimator)?,
        })
    }

    pub fn generator(&self) -> &ClaimsGenerator {
        &self.generator
    }

    pub fn estimator(&self) -> &SeverityEstimator {
        &self.estimator
    }

    /// Generate the book from the configured seed and persist it under `dir`
    pub fn generate_to<P: AsRef<Path>>(&self, dir: P) -> Result<GeneratedBook> {
        let book = self.generator.generate_seeded()?;
        write_dataset(dir, &book.dataset)?;
        Ok(book)
    }

    /// Load the dataset persisted under `dir` and estimate it
    pub fn estimate_from<P: AsRef<Path>>(&self, dir: P) -> Result<EstimatorReport> {
        let dataset = load_dataset(dir)?;
        self.estimator.estimate(&dataset)
    }

    /// Both stages, handing off through the files under `dir`
    pub fn run<P: AsRef<Path>>(&self, dir: P) -> Result<(GeneratedBook, EstimatorReport)> {
        let book = self.generate_to(dir.as_ref())?;
        let report = self.estimate_from(dir.as_ref())?;
        Ok((book, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CLAIMS_FILE, SUMMARY_FILE};
    use std::fs;

    #[test]
    fn test_end_to_end_reference_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(AnalyticsConfig::default()).unwrap();
        let (book, report) = pipeline.run(dir.path()).unwrap();

        assert_eq!(report.summary, book.dataset.summary);
        assert_eq!(
            report.summary.iter().map(|r| r.year).collect::<Vec<_>>(),
            vec![2020, 2021, 2022, 2023, 2024]
        );
        assert!(report.summary.windows(2).all(|w| w[0].insured_cars <= w[1].insured_cars));
        assert!(report.summary.iter().all(|r| (85..=115).contains(&r.insured_cars)));
    }

    #[test]
    fn test_repeat_runs_write_identical_files() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(AnalyticsConfig::default()).unwrap();
        pipeline.generate_to(first.path()).unwrap();
        pipeline.generate_to(second.path()).unwrap();

        for file in [SUMMARY_FILE, CLAIMS_FILE] {
            let a = fs::read(first.path().join(file)).unwrap();
            let b = fs::read(second.path().join(file)).unwrap();
            assert_eq!(a, b, "{} differs", file);
        }
    }

    #[test]
    fn test_estimate_twice_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(AnalyticsConfig::default()).unwrap();
        pipeline.generate_to(dir.path()).unwrap();

        let first = pipeline.estimate_from(dir.path()).unwrap();
        let second = pipeline.estimate_from(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_loaded_dataset_estimates_like_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(AnalyticsConfig::default()).unwrap();
        let book = pipeline.generate_to(dir.path()).unwrap();

        let in_memory = pipeline.estimator().estimate(&book.dataset).unwrap();
        let from_disk = pipeline.estimate_from(dir.path()).unwrap();
        assert_eq!(in_memory, from_disk);
    }

    #[test]
    fn test_missing_dataset_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(AnalyticsConfig::default()).unwrap();
        assert!(pipeline.estimate_from(dir.path()).is_err());
    }
}
