//! Ordered random-draw contract of the generator
//!
//! Output under a fixed seed depends on the order in which the generator
//! consumes random numbers. The order is:
//!
//! 1. `Exposure` for every year, first to last (each year's draw is bounded
//!    below by the previous year's result).
//! 2. Then, for each year in turn, the steps of [`YEARLY_DRAW_ORDER`].
//!
//! Reordering any of these changes every value generated after the change.

use serde::{Deserialize, Serialize};

/// A named group of random draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawStep {
    /// Insured-car count
    Exposure,
    /// Claims per insured car
    ClaimFrequency,
    /// Share of non-liable claims
    LiabilitySplit,
    /// Gamma shape of liable severities
    SeverityShape,
    /// Gamma scale of liable severities
    SeverityScale,
    /// One gamma draw per liable claim
    SeverityValues,
    /// Permutation of pooled zero and liable costs
    Shuffle,
    /// One day offset per claim
    AccidentDates,
}

/// Per-year draws, after the exposure path has been drawn for all years
pub const YEARLY_DRAW_ORDER: [DrawStep; 7] = [
    DrawStep::ClaimFrequency,
    DrawStep::LiabilitySplit,
    DrawStep::SeverityShape,
    DrawStep::SeverityScale,
    DrawStep::SeverityValues,
    DrawStep::Shuffle,
    DrawStep::AccidentDates,
];

/// One step taken for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub year: i32,
    pub step: DrawStep,
}

/// Draw sequence the contract prescribes for `years`
pub fn expected_draw_log(years: &[i32]) -> Vec<DrawRecord> {
    let exposure = years.iter().map(|&year| DrawRecord {
        year,
        step: DrawStep::Exposure,
    });
    let yearly = years
        .iter()
        .flat_map(|&year| YEARLY_DRAW_ORDER.iter().map(move |&step| DrawRecord { year, step }));
    exposure.chain(yearly).collect()
}

/// Draws actually taken, in order
#[derive(Debug, Default)]
pub struct DrawLog {
    records: Vec<DrawRecord>,
}

impl DrawLog {
    pub fn record(&mut self, year: i32, step: DrawStep) {
        self.records.push(DrawRecord { year, step });
    }

    pub fn into_records(self) -> Vec<DrawRecord> {
        self.records
    }
}
