use log::debug;

use super::model::{CellValue, NormalizedTable};
use super::schema::{SheetCategory, IDENTIFIER_COLUMN, NAME_COLUMN, RANK_MARKER};

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// One percentile cutoff: "keep the best `percentile`% by `metric`".
/// A percentile of 100 is a no-op stage and is skipped entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStage {
    /// Rank metric column the cutoff applies to (e.g. `1M排名`).
    pub metric: String,
    /// Cutoff in [0, 100].
    pub percentile: u8,
}

/// Ordered list of cutoff stages; order matters (see [`screen`]).
pub type FilterSpec = Vec<FilterStage>;

// ---------------------------------------------------------------------------
// Percentile filtering
// ---------------------------------------------------------------------------

/// Apply the classification match and the sequential percentile stages.
///
/// Stages run strictly in caller order, and each stage's quantile is computed
/// over the rows surviving the previous stage, not the original population.
/// That sequential narrowing is intentional: it is *not* equivalent to
/// filtering every stage against the full classification-matched set.
///
/// Skipped stages: percentile == 100 (no-op), and metrics the table does not
/// carry (short export variants lack the 5Y/10Y rank columns). With no active
/// stages every classification-matched record passes through.
///
/// No classification match is a valid empty result, never an error.
pub fn screen(
    table: &NormalizedTable,
    category: SheetCategory,
    classification: &str,
    spec: &FilterSpec,
) -> NormalizedTable {
    let class_column = category.classification_column();

    let matched: Vec<usize> = (0..table.len())
        .filter(|&i| table.value(i, class_column).as_str() == Some(classification))
        .collect();

    let active: Vec<&FilterStage> = spec
        .iter()
        .filter(|s| s.percentile < 100 && table.has_column(&s.metric))
        .collect();

    debug!(
        "screening '{classification}': {} matched records, {} active of {} stages",
        matched.len(),
        active.len(),
        spec.len()
    );

    // Project to the identifier/name keys plus the active metrics.
    let mut columns = vec![IDENTIFIER_COLUMN.to_string(), NAME_COLUMN.to_string()];
    for stage in &active {
        if !columns.contains(&stage.metric) {
            columns.push(stage.metric.clone());
        }
    }

    // Fold over stages, each producing a fresh surviving-index snapshot.
    let mut surviving = matched;
    for stage in &active {
        surviving = apply_stage(table, &surviving, stage);
    }

    let records = surviving
        .iter()
        .map(|&i| {
            columns
                .iter()
                .map(|col| {
                    let mut value = table.value(i, col).clone();
                    if col.contains(RANK_MARKER) {
                        value = coerce_rank(value);
                    }
                    (col.clone(), value)
                })
                .collect()
        })
        .collect();

    NormalizedTable { columns, records }
}

/// One stage: drop rows missing the metric, compute the quantile cutoff over
/// the remaining values, keep rows at or below it (boundary ties included).
fn apply_stage(table: &NormalizedTable, surviving: &[usize], stage: &FilterStage) -> Vec<usize> {
    let present: Vec<(usize, f64)> = surviving
        .iter()
        .filter_map(|&i| table.value(i, &stage.metric).as_f64().map(|v| (i, v)))
        .collect();

    let values: Vec<f64> = present.iter().map(|&(_, v)| v).collect();
    let Some(cutoff) = quantile(&values, f64::from(stage.percentile) / 100.0) else {
        return Vec::new();
    };

    present
        .into_iter()
        .filter(|&(_, v)| v <= cutoff)
        .map(|(i, _)| i)
        .collect()
}

/// Inclusive quantile with linear interpolation between ranks (the pandas
/// default). `None` when there are no observations.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Whole-number rank values are shown as integers; display-only.
fn coerce_rank(value: CellValue) -> CellValue {
    match value {
        CellValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            CellValue::Integer(f as i64)
        }
        other => other,
    }
}
