//! CSV row layouts of the Summary and Claims tables

use super::{ClaimRecord, YearRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row of summary.csv
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SummaryRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Accidents")]
    pub accidents: u32,
    #[serde(rename = "Cars")]
    pub cars: u32,
}

impl From<&YearRecord> for SummaryRow {
    fn from(record: &YearRecord) -> Self {
        Self {
            year: record.year,
            cost: record.total_cost,
            accidents: record.claim_count,
            cars: record.insured_cars,
        }
    }
}

impl SummaryRow {
    pub fn into_record(self) -> YearRecord {
        YearRecord {
            year: self.year,
            total_cost: self.cost,
            claim_count: self.accidents,
            insured_cars: self.cars,
        }
    }
}

/// Row of claims.csv; the date stays textual until validated
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ClaimRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Cost")]
    pub cost: f64,
}

impl From<&ClaimRecord> for ClaimRow {
    fn from(record: &ClaimRecord) -> Self {
        Self {
            date: record.accident_date.format(DATE_FORMAT).to_string(),
            year: record.year,
            cost: record.cost,
        }
    }
}

impl ClaimRow {
    pub fn into_record(self) -> Result<ClaimRecord, String> {
        let accident_date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| format!("unparseable date {:?}: {}", self.date, e))?;
        if !self.cost.is_finite() {
            return Err(format!("non-finite cost on {}", self.date));
        }
        Ok(ClaimRecord::new(accident_date, self.year, self.cost))
    }
}
