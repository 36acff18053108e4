//! Error types for generation, persistence and estimation

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ClaimsError>;

/// Failure taxonomy of the claims pipeline.
#[derive(Debug, Error)]
pub enum ClaimsError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (config or report) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset tables are inconsistent or unparseable
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    /// No strictly positive cost left to fit
    #[error("No liable claims with positive cost in the fit sample")]
    EmptySample,

    /// Sample exists but cannot identify the distribution
    #[error("Degenerate fit sample: {0}")]
    DegenerateSample(String),

    /// Probability argument outside the open unit interval
    #[error("Probability {0} is outside (0, 1)")]
    InvalidProbability(f64),

    /// Distribution constructor rejected its parameters
    #[error("Distribution error: {0}")]
    Distribution(String),
}
