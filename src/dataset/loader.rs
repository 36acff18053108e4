//! Load the Summary and Claims tables from CSV

use super::table::{ClaimRow, SummaryRow};
use super::{ClaimRecord, ClaimsDataset, YearRecord, CLAIMS_FILE, SUMMARY_FILE};
use crate::config::DEFAULT_DATASET_DIR;
use crate::error::{ClaimsError, Result};
use csv::Reader;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load the Summary table from any reader
pub fn load_summary_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<YearRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut summary = Vec::new();

    for result in csv_reader.deserialize() {
        let row: SummaryRow = result?;
        summary.push(row.into_record());
    }

    Ok(summary)
}

/// Load the Claims table from any reader
pub fn load_claims_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ClaimRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut claims = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: ClaimRow = result?;
        let claim = row
            .into_record()
            .map_err(|e| ClaimsError::MalformedDataset(format!("claim row {}: {}", index + 1, e)))?;
        claims.push(claim);
    }

    Ok(claims)
}

/// Assemble and validate a dataset from the two table readers
pub fn load_dataset_from_readers<S: std::io::Read, C: std::io::Read>(
    summary: S,
    claims: C,
) -> Result<ClaimsDataset> {
    let dataset = ClaimsDataset {
        summary: load_summary_from_reader(summary)?,
        claims: load_claims_from_reader(claims)?,
    };

    dataset.check_consistency().map_err(ClaimsError::MalformedDataset)?;

    let negative = dataset.claims.iter().filter(|c| c.cost < 0.0).count();
    if negative > 0 {
        warn!("Dataset holds {} claims with negative cost; they are excluded from fitting", negative);
    }

    Ok(dataset)
}

/// Load both tables from a dataset directory
pub fn load_dataset<P: AsRef<Path>>(dir: P) -> Result<ClaimsDataset> {
    let dir = dir.as_ref();
    let dataset = load_dataset_from_readers(
        File::open(dir.join(SUMMARY_FILE))?,
        File::open(dir.join(CLAIMS_FILE))?,
    )?;

    info!(
        "Loaded {} years and {} claims from {}",
        dataset.summary.len(),
        dataset.claims.len(),
        dir.display()
    );
    Ok(dataset)
}

/// Load the dataset from the default directory
pub fn load_default_dataset() -> Result<ClaimsDataset> {
    load_dataset(DEFAULT_DATASET_DIR)
}
