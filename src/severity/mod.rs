//! Severity model: shifted gamma distribution, fitting and diagnostics

mod gamma;
mod describe;
mod histogram;
pub mod fit;
pub mod ks;

pub use gamma::{GammaParams, ShiftedGamma};
pub use describe::{percentile, SampleSummary};
pub use histogram::{histogram, HistogramBin};
pub use fit::{fit_gamma, GammaFit};
pub use ks::{ks_test, kolmogorov_sf, KsTest};
