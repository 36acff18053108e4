//! Synthetic claims book generator

use super::draws::{DrawLog, DrawRecord, DrawStep};
use super::exposure::exposure_path;
use crate::config::GeneratorConfig;
use crate::dataset::{ClaimRecord, ClaimsDataset, YearRecord};
use crate::error::{ClaimsError, Result};
use crate::inflation::inflation_factor;
use chrono::{Days, NaiveDate};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Gamma};
use serde::Serialize;

/// Days an accident date may fall after 1 January (leap days not modelled)
const DAYS_PER_YEAR: u64 = 365;

/// Parameters drawn for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearDraws {
    pub year: i32,
    pub insured_cars: u32,
    pub claim_frequency: f64,
    pub num_claims: u32,
    pub non_liable_ratio: f64,
    pub num_non_liable: u32,
    pub severity_shape: f64,
    /// Scale after inflation to this year
    pub severity_scale: f64,
}

/// Liable draws that fell outside the positive range
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeverityAnomalies {
    /// Rounded draws below zero
    pub negative: usize,
    /// Rounded draws of exactly zero, indistinguishable from non-liable claims
    pub zero: usize,
    /// Negative draws replaced by zero
    pub clipped: usize,
}

impl SeverityAnomalies {
    pub fn any(&self) -> bool {
        self.negative > 0 || self.zero > 0
    }
}

/// Output of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedBook {
    pub dataset: ClaimsDataset,
    pub year_draws: Vec<YearDraws>,
    pub draw_log: Vec<DrawRecord>,
    pub anomalies: SeverityAnomalies,
}

/// Generator of a synthetic claims book
#[derive(Debug, Clone)]
pub struct ClaimsGenerator {
    config: GeneratorConfig,
}

impl ClaimsGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate with a ChaCha20 generator seeded from the config
    pub fn generate_seeded(&self) -> Result<GeneratedBook> {
        let mut rng = ChaCha20Rng::seed_from_u64(self.config.seed);
        self.generate(&mut rng)
    }

    /// Generate the whole book, consuming `rng` in the documented draw order
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedBook> {
        let cfg = &self.config;
        let years: Vec<i32> = cfg.years().collect();
        let mut log = DrawLog::default();
        let mut anomalies = SeverityAnomalies::default();

        let cars_path = exposure_path(rng, &years, cfg.min_cars, cfg.max_cars, &mut log);

        let mut dataset = ClaimsDataset::default();
        let mut year_draws = Vec::with_capacity(years.len());

        for (&year, &insured_cars) in years.iter().zip(&cars_path) {
            let claim_frequency = rng.random_range(cfg.claim_frequency.low..=cfg.claim_frequency.high);
            log.record(year, DrawStep::ClaimFrequency);
            let num_claims = (insured_cars as f64 * claim_frequency).floor() as u32;

            let non_liable_ratio = rng.random_range(cfg.non_liable_ratio.low..=cfg.non_liable_ratio.high);
            log.record(year, DrawStep::LiabilitySplit);
            let num_non_liable = (num_claims as f64 * non_liable_ratio).floor() as u32;

            let severity_shape = rng.random_range(cfg.severity_shape.low..=cfg.severity_shape.high);
            log.record(year, DrawStep::SeverityShape);

            let base_scale = rng.random_range(cfg.severity_scale.low..=cfg.severity_scale.high);
            log.record(year, DrawStep::SeverityScale);
            let severity_scale = base_scale * inflation_factor(cfg.inflation, cfg.first_year, year);

            let severity = Gamma::new(severity_shape, severity_scale)
                .map_err(|e| ClaimsError::Distribution(e.to_string()))?;
            let mut costs = vec![0.0; num_non_liable as usize];
            for _ in num_non_liable..num_claims {
                let cost = (cfg.severity_location + severity.sample(rng)).round();
                costs.push(self.screen_liable_cost(cost, &mut anomalies));
            }
            log.record(year, DrawStep::SeverityValues);

            costs.shuffle(rng);
            log.record(year, DrawStep::Shuffle);

            let dates = accident_dates(rng, year, costs.len())?;
            log.record(year, DrawStep::AccidentDates);

            let claims: Vec<ClaimRecord> = dates
                .into_iter()
                .zip(costs)
                .map(|(date, cost)| ClaimRecord::new(date, year, cost))
                .collect();
            let summary = YearRecord::from_claims(year, insured_cars, &claims);

            debug!(
                "{}: {} cars, {} claims ({} non-liable), shape {:.4}, scale {:.2}, total cost {:.0}",
                year, insured_cars, num_claims, num_non_liable, severity_shape, severity_scale, summary.total_cost
            );

            dataset.summary.push(summary);
            dataset.claims.extend(claims);
            year_draws.push(YearDraws {
                year,
                insured_cars,
                claim_frequency,
                num_claims,
                non_liable_ratio,
                num_non_liable,
                severity_shape,
                severity_scale,
            });
        }

        if anomalies.any() {
            warn!(
                "Liable severity draws out of range: {} negative ({} clipped to zero), {} rounded to zero",
                anomalies.negative, anomalies.clipped, anomalies.zero
            );
        }
        info!(
            "Generated {} claims ({} liable) across {} years",
            dataset.claims.len(),
            dataset.liable_count(),
            dataset.summary.len()
        );

        Ok(GeneratedBook {
            dataset,
            year_draws,
            draw_log: log.into_records(),
            anomalies,
        })
    }

    /// Tally a rounded liable cost that is not positive, clipping if configured
    fn screen_liable_cost(&self, cost: f64, anomalies: &mut SeverityAnomalies) -> f64 {
        if cost < 0.0 {
            anomalies.negative += 1;
            if self.config.clip_negative_severity {
                anomalies.clipped += 1;
                return 0.0;
            }
            cost
        } else if cost == 0.0 {
            anomalies.zero += 1;
            // normalise -0.0
            0.0
        } else {
            cost
        }
    }
}

/// Uniform day offsets from 1 January of `year`
fn accident_dates<R: Rng + ?Sized>(rng: &mut R, year: i32, count: usize) -> Result<Vec<NaiveDate>> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ClaimsError::InvalidConfig(format!("year {year} is outside the calendar range")))?;

    (0..count)
        .map(|_| {
            let offset = rng.random_range(0..DAYS_PER_YEAR);
            start
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| ClaimsError::InvalidConfig(format!("date overflow in year {year}")))
        })
        .collect()
}
