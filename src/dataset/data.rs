//! Year and claim records of a synthesized claims book

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One simulated insurance claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRecord {
    pub accident_date: NaiveDate,
    pub year: i32,
    /// 0 for a non-liable claim, the severity otherwise
    pub cost: f64,
}

impl ClaimRecord {
    pub fn new(accident_date: NaiveDate, year: i32, cost: f64) -> Self {
        Self { accident_date, year, cost }
    }

    pub fn is_liable(&self) -> bool {
        self.cost > 0.0
    }

    pub fn date_in_year(&self) -> bool {
        self.accident_date.year() == self.year
    }
}

/// Exposure and claim aggregates for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRecord {
    pub year: i32,
    /// Sum of liable claim costs
    pub total_cost: f64,
    /// All claims, liable or not
    pub claim_count: u32,
    pub insured_cars: u32,
}

impl YearRecord {
    /// Aggregate the claims of `year`; claims of other years are ignored
    pub fn from_claims(year: i32, insured_cars: u32, claims: &[ClaimRecord]) -> Self {
        let (total_cost, claim_count) = claims
            .iter()
            .filter(|c| c.year == year)
            .fold((0.0, 0u32), |(total, count), c| (total + c.cost, count + 1));

        Self {
            year,
            total_cost,
            claim_count,
            insured_cars,
        }
    }
}

/// The Summary and Claims tables, related by year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClaimsDataset {
    pub summary: Vec<YearRecord>,
    pub claims: Vec<ClaimRecord>,
}

impl ClaimsDataset {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.summary.iter().map(|row| row.year)
    }

    pub fn claims_for_year(&self, year: i32) -> impl Iterator<Item = &ClaimRecord> + '_ {
        self.claims.iter().filter(move |c| c.year == year)
    }

    pub fn liable_count(&self) -> usize {
        self.claims.iter().filter(|c| c.is_liable()).count()
    }

    /// Check the relationship between the two tables.
    ///
    /// Summary years strictly increase; every claim belongs to a summary year
    /// and is dated within it; each year's claim count matches its claims.
    pub fn check_consistency(&self) -> Result<(), String> {
        for pair in self.summary.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(format!(
                    "summary years not strictly increasing: {} then {}",
                    pair[0].year, pair[1].year
                ));
            }
        }

        for (row, claim) in self.claims.iter().enumerate() {
            if !self.summary.iter().any(|s| s.year == claim.year) {
                return Err(format!("claim row {} has year {} absent from summary", row + 1, claim.year));
            }
            if !claim.date_in_year() {
                return Err(format!(
                    "claim row {} dated {} outside its year {}",
                    row + 1,
                    claim.accident_date,
                    claim.year
                ));
            }
        }

        for year in &self.summary {
            let count = self.claims_for_year(year.year).count();
            if count != year.claim_count as usize {
                return Err(format!(
                    "year {} reports {} accidents but claims table has {}",
                    year.year, year.claim_count, count
                ));
            }
        }

        Ok(())
    }
}
