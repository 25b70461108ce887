//! Transcript scoring: edit distance and dataset-wide error rates.

pub mod edit_distance;
mod summary;

pub use edit_distance::{char_distance, distance, word_distance};
pub use summary::{SummaryStats, format_rate};
