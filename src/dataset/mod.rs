//! Claims dataset records and their two-table CSV persistence

mod data;
mod table;
pub mod loader;
pub mod writer;

pub use data::{ClaimRecord, ClaimsDataset, YearRecord};
pub use loader::{load_dataset, load_dataset_from_readers, load_default_dataset};
pub use table::DATE_FORMAT;
pub use writer::{write_claims, write_dataset, write_summary};

/// File name of the Summary table inside a dataset directory
pub const SUMMARY_FILE: &str = "summary.csv";

/// File name of the Claims table inside a dataset directory
pub const CLAIMS_FILE: &str = "claims.csv";
