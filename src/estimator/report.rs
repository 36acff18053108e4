//! Estimator output and its console rendering

use super::normalize::YearlyView;
use super::risk::{CostQuantile, Exceedance, PremiumAdequacy};
use crate::dataset::YearRecord;
use crate::severity::{GammaFit, HistogramBin, KsTest, SampleSummary};
use serde::Serialize;
use std::fmt::Write;

/// Everything the estimator derives from one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorReport {
    pub reference_year: i32,
    pub summary: Vec<YearRecord>,
    pub yearly: Vec<YearlyView>,
    pub sample: SampleSummary,
    pub fit: GammaFit,
    pub goodness_of_fit: KsTest,
    pub exceedances: Vec<Exceedance>,
    pub quantiles: Vec<CostQuantile>,
    pub premium: PremiumAdequacy,
    pub histogram: Vec<HistogramBin>,
}

impl EstimatorReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text report for the console
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Summary")?;
        writeln!(out, "{:>6} {:>14} {:>10} {:>6}", "Year", "Cost", "Accidents", "Cars")?;
        writeln!(out, "{}", "-".repeat(39))?;
        for row in &self.summary {
            writeln!(
                out,
                "{:>6} {:>14.1} {:>10} {:>6}",
                row.year, row.total_cost, row.claim_count, row.insured_cars
            )?;
        }

        writeln!(out, "\nInflation adjusted to {}", self.reference_year)?;
        writeln!(out, "{:>6} {:>16} {:>14}", "Year", "Adjusted cost", "Liable claims")?;
        writeln!(out, "{}", "-".repeat(38))?;
        for row in &self.yearly {
            writeln!(out, "{:>6} {:>16.0} {:>14}", row.year, row.adjusted_total, row.liable_claims)?;
        }

        let s = &self.sample;
        writeln!(out, "\nAdjusted liable cost")?;
        writeln!(out, "  count {:>12}", s.count)?;
        writeln!(out, "  mean  {:>12.2}", s.mean)?;
        writeln!(out, "  std   {:>12.2}", s.std_dev)?;
        writeln!(out, "  min   {:>12.2}", s.min)?;
        writeln!(out, "  25%   {:>12.2}", s.q25)?;
        writeln!(out, "  50%   {:>12.2}", s.median)?;
        writeln!(out, "  75%   {:>12.2}", s.q75)?;
        writeln!(out, "  max   {:>12.2}", s.max)?;

        let p = &self.fit.params;
        writeln!(
            out,
            "\nshape : {}, loc : {}, scale : {}{}",
            p.shape,
            p.location,
            p.scale,
            if self.fit.location_fixed { " (location fixed)" } else { "" }
        )?;
        writeln!(
            out,
            "KS test: statistic={:.6}, pvalue={:.6} (n={})",
            self.goodness_of_fit.statistic, self.goodness_of_fit.p_value, self.goodness_of_fit.sample_size
        )?;

        writeln!(out)?;
        for e in &self.exceedances {
            writeln!(out, "Probability of average cost exceeding {}: {:.2}%", e.threshold, 100.0 * e.probability)?;
        }

        writeln!(out)?;
        for q in &self.quantiles {
            writeln!(
                out,
                "{}% probability of average cost exceeding {}",
                (100.0 * q.exceedance).round(),
                q.cost
            )?;
        }

        let pa = &self.premium;
        writeln!(out)?;
        writeln!(
            out,
            "{:.2}% chance of a profit of {} or more with premium at {}",
            pa.profit_probability_pct, pa.margin, pa.premium
        )?;
        writeln!(
            out,
            "{:.2}% chance of a loss of {} or more with premium at {}",
            pa.loss_probability_pct, pa.margin, pa.premium
        )?;
        Ok(())
    }
}
