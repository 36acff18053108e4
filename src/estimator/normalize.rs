//! Inflation restatement of claim costs and the yearly cross-check view

use crate::dataset::ClaimsDataset;
use crate::inflation::restate;
use serde::{Deserialize, Serialize};

/// A claim cost restated to the reference year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedClaim {
    pub year: i32,
    pub cost: f64,
    pub adjusted_cost: f64,
}

/// Per-year totals recomputed from the Claims table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyView {
    pub year: i32,
    /// Inflation-adjusted total cost, rounded to whole units
    pub adjusted_total: f64,
    pub liable_claims: usize,
}

/// Restate every claim of the dataset to `reference_year`
pub fn adjust_claims(dataset: &ClaimsDataset, inflation: f64, reference_year: i32) -> Vec<AdjustedClaim> {
    dataset
        .claims
        .iter()
        .map(|claim| AdjustedClaim {
            year: claim.year,
            cost: claim.cost,
            adjusted_cost: restate(claim.cost, inflation, claim.year, reference_year),
        })
        .collect()
}

/// One row per summary year, totals taken from the adjusted claims
pub fn yearly_view(dataset: &ClaimsDataset, adjusted: &[AdjustedClaim]) -> Vec<YearlyView> {
    dataset
        .years()
        .map(|year| {
            let (total, liable) = adjusted
                .iter()
                .filter(|c| c.year == year)
                .fold((0.0, 0usize), |(total, liable), c| {
                    (total + c.adjusted_cost, liable + usize::from(c.cost > 0.0))
                });
            YearlyView {
                year,
                adjusted_total: total.round(),
                liable_claims: liable,
            }
        })
        .collect()
}

/// Strictly positive adjusted costs: the severity fit population
pub fn fit_sample(adjusted: &[AdjustedClaim]) -> Vec<f64> {
    adjusted
        .iter()
        .map(|c| c.adjusted_cost)
        .filter(|&cost| cost > 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ClaimRecord, YearRecord};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn dataset() -> ClaimsDataset {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let claims = vec![
            ClaimRecord::new(d(2020, 1, 1), 2020, 10_000.0),
            ClaimRecord::new(d(2020, 5, 1), 2020, 0.0),
            ClaimRecord::new(d(2024, 9, 9), 2024, 2_000.0),
            ClaimRecord::new(d(2024, 9, 10), 2024, 3_000.0),
        ];
        let summary = vec![
            YearRecord::from_claims(2020, 85, &claims),
            YearRecord::from_claims(2022, 90, &claims),
            YearRecord::from_claims(2024, 99, &claims),
        ];
        ClaimsDataset { summary, claims }
    }

    #[test]
    fn test_adjustment() {
        let adjusted = adjust_claims(&dataset(), 0.03, 2025);
        assert_relative_eq!(adjusted[0].adjusted_cost, 10_000.0 * 1.03_f64.powi(5));
        assert_eq!(adjusted[1].adjusted_cost, 0.0);
        assert_relative_eq!(adjusted[2].adjusted_cost, 2_060.0);
    }

    #[test]
    fn test_yearly_view() {
        let data = dataset();
        let adjusted = adjust_claims(&data, 0.03, 2025);
        let view = yearly_view(&data, &adjusted);

        assert_eq!(view.len(), 3);
        assert_eq!(view[0], YearlyView { year: 2020, adjusted_total: 11_593.0, liable_claims: 1 });
        assert_eq!(view[1], YearlyView { year: 2022, adjusted_total: 0.0, liable_claims: 0 });
        assert_eq!(view[2], YearlyView { year: 2024, adjusted_total: 5_150.0, liable_claims: 2 });
    }

    #[test]
    fn test_fit_sample_drops_non_liable() {
        let adjusted = adjust_claims(&dataset(), 0.03, 2025);
        assert_eq!(fit_sample(&adjusted).len(), 3);
    }
}
