//! Write the Summary and Claims tables as CSV

use super::table::{ClaimRow, SummaryRow};
use super::{ClaimRecord, ClaimsDataset, YearRecord, CLAIMS_FILE, SUMMARY_FILE};
use crate::error::Result;
use csv::Writer;
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write the Summary table to any writer
pub fn write_summary<W: Write>(writer: W, summary: &[YearRecord]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for record in summary {
        csv_writer.serialize(SummaryRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the Claims table to any writer
pub fn write_claims<W: Write>(writer: W, claims: &[ClaimRecord]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for record in claims {
        csv_writer.serialize(ClaimRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Persist both tables under `dir`, creating it if needed
pub fn write_dataset<P: AsRef<Path>>(dir: P, dataset: &ClaimsDataset) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    write_summary(fs::File::create(dir.join(SUMMARY_FILE))?, &dataset.summary)?;
    write_claims(fs::File::create(dir.join(CLAIMS_FILE))?, &dataset.claims)?;

    info!(
        "Wrote {} summary rows and {} claims to {}",
        dataset.summary.len(),
        dataset.claims.len(),
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_table_headers_and_rows() {
        let claims = vec![
            ClaimRecord::new(NaiveDate::from_ymd_opt(2021, 2, 3).unwrap(), 2021, 0.0),
            ClaimRecord::new(NaiveDate::from_ymd_opt(2021, 11, 30).unwrap(), 2021, 15234.0),
        ];
        let summary = vec![YearRecord::from_claims(2021, 97, &claims)];

        let mut summary_buf = Vec::new();
        write_summary(&mut summary_buf, &summary).unwrap();
        let summary_csv = String::from_utf8(summary_buf).unwrap();
        let mut lines = summary_csv.lines();
        assert_eq!(lines.next(), Some("Year,Cost,Accidents,Cars"));
        assert_eq!(lines.next(), Some("2021,15234.0,2,97"));

        let mut claims_buf = Vec::new();
        write_claims(&mut claims_buf, &claims).unwrap();
        let claims_csv = String::from_utf8(claims_buf).unwrap();
        let lines: Vec<_> = claims_csv.lines().collect();
        assert_eq!(lines, vec!["Date,Year,Cost", "2021-02-03,2021,0.0", "2021-11-30,2021,15234.0"]);
    }
}
