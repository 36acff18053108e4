//! Descriptive statistics of the fit sample

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl SampleSummary {
    /// Summarize a sample; `None` when it is empty
    pub fn from_sample(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }

        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            count: n,
            mean,
            std_dev,
            min: sorted[0],
            q25: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.50),
            q75: percentile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

/// Linear-interpolated percentile of an ascending, non-empty slice
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary() {
        let summary = SampleSummary::from_sample(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.mean, 2.5);
        assert_relative_eq!(summary.std_dev, (5.0_f64 / 3.0).sqrt());
        assert_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.q25, 1.75);
        assert_relative_eq!(summary.median, 2.5);
        assert_relative_eq!(summary.q75, 3.25);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_single_and_empty() {
        assert!(SampleSummary::from_sample(&[]).is_none());
        let single = SampleSummary::from_sample(&[7.0]).unwrap();
        assert_eq!(single.median, 7.0);
        assert!(single.std_dev.is_nan());
    }
}
