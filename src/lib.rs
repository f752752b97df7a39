//! Fund performance screener.
//!
//! Ingests a semi-structured spreadsheet export of fund performance data,
//! normalizes it into a keyed table, and applies sequential percentile-rank
//! cutoffs per metric to produce a shortlist of funds for a classification.
//!
//! The pipeline is request-scoped and synchronous: one workbook upload runs
//! one normalize → filter → merge pass over an in-memory table, with no
//! shared state between invocations.

pub mod data;
pub mod error;
pub mod export;
pub mod pipeline;

pub use error::Error;
pub use pipeline::{run, RankThresholds, ScreenOutcome, ScreenRequest};
