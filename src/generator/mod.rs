//! Synthetic claims generation: exposure path, claim volume, liability split, severities, dates

mod draws;
mod engine;
mod exposure;

pub use draws::{expected_draw_log, DrawLog, DrawRecord, DrawStep, YEARLY_DRAW_ORDER};
pub use engine::{ClaimsGenerator, GeneratedBook, SeverityAnomalies, YearDraws};
pub use exposure::exposure_path;
