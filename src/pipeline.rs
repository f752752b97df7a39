use log::info;

use crate::data::filter::{screen, FilterSpec, FilterStage};
use crate::data::loader::read_sheet;
use crate::data::merge::merge;
use crate::data::model::NormalizedTable;
use crate::data::normalize::normalize;
use crate::data::schema::{SheetCategory, RANK_METRICS};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// The eight percentile thresholds, one per rank metric, each in [0, 100].
/// 100 means "no cutoff for this metric".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankThresholds {
    pub m1: u8,
    pub m3: u8,
    pub m6: u8,
    pub y1: u8,
    pub y2: u8,
    pub y3: u8,
    pub y5: u8,
    pub y10: u8,
}

impl Default for RankThresholds {
    fn default() -> Self {
        RankThresholds {
            m1: 100,
            m3: 100,
            m6: 100,
            y1: 100,
            y2: 100,
            y3: 100,
            y5: 100,
            y10: 100,
        }
    }
}

impl RankThresholds {
    /// Expand to the ordered filter spec over the rank metric columns.
    pub fn to_filter_spec(self) -> FilterSpec {
        let thresholds = [
            self.m1, self.m3, self.m6, self.y1, self.y2, self.y3, self.y5, self.y10,
        ];
        RANK_METRICS
            .iter()
            .zip(thresholds)
            .map(|(metric, percentile)| FilterStage {
                metric: metric.to_string(),
                percentile,
            })
            .collect()
    }
}

/// Everything one screening invocation needs, decoupled from however the
/// values were acquired. Nothing here outlives the invocation.
#[derive(Debug, Clone)]
pub struct ScreenRequest {
    /// Worksheet to read from the uploaded workbook.
    pub sheet_name: String,
    /// Classification label to filter within (exact, case-sensitive).
    pub classification: String,
    /// Percentile cutoffs per rank metric.
    pub thresholds: RankThresholds,
}

/// The two result tables of a screening run.
#[derive(Debug, Clone)]
pub struct ScreenOutcome {
    /// Filtered ranks view: keys plus the active metric columns.
    pub ranks: NormalizedTable,
    /// Full-detail view: every original column for the surviving keys.
    pub detail: NormalizedTable,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Run the complete normalize → filter → merge pipeline over one workbook.
/// Pure computation after the byte decode; no state is shared or cached
/// across invocations.
pub fn run(workbook: &[u8], request: &ScreenRequest) -> Result<ScreenOutcome, Error> {
    let category = SheetCategory::from_sheet_name(&request.sheet_name)?;
    let raw = read_sheet(workbook, &request.sheet_name)?;
    let table = normalize(&raw, category)?;
    info!(
        "normalized '{}' ({category}): {} records",
        request.sheet_name,
        table.len()
    );

    let spec = request.thresholds.to_filter_spec();
    let ranks = screen(&table, category, &request.classification, &spec);
    let detail = merge(&ranks, &table);
    info!(
        "classification '{}': {} funds survive",
        request.classification,
        ranks.len()
    );

    Ok(ScreenOutcome { ranks, detail })
}
