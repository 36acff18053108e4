//! Equal-width histogram of severities with the fitted density alongside

use super::ShiftedGamma;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// `count` over the display divisor, to sit on the density's scale
    pub scaled_count: f64,
    /// Fitted density at the bin midpoint
    pub density: f64,
}

/// Bin `sample` into `bins` equal-width bins spanning its min..max
pub fn histogram(sample: &[f64], bins: usize, display_divisor: f64, model: &ShiftedGamma) -> Vec<HistogramBin> {
    if sample.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (min, max) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &x in sample {
        let index = if width > 0.0 { ((x - min) / width) as usize } else { 0 };
        // max lands on the upper edge of the last bin
        counts[index.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + width * i as f64;
            let upper = if i + 1 == bins { max } else { lower + width };
            HistogramBin {
                lower,
                upper,
                count,
                scaled_count: count as f64 / display_divisor,
                density: model.pdf(0.5 * (lower + upper)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_cover_sample() {
        let model = ShiftedGamma::new(1.0, 0.0, 10.0).unwrap();
        let sample = [0.5, 1.0, 2.5, 9.9, 10.0, 4.0];
        let bins = histogram(&sample, 4, 100.0, &model);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), sample.len());
        assert_eq!(bins[0].lower, 0.5);
        assert_eq!(bins[3].upper, 10.0);
        assert_eq!(bins[3].count, 2);
        assert_eq!(bins[0].scaled_count, bins[0].count as f64 / 100.0);
        assert!(bins[0].density > bins[3].density);
    }

    #[test]
    fn test_empty() {
        let model = ShiftedGamma::new(1.0, 0.0, 10.0).unwrap();
        assert!(histogram(&[], 10, 1.0, &model).is_empty());
    }
}
