use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::data::model::NormalizedTable;

// ---------------------------------------------------------------------------
// Delimited / JSON output
// ---------------------------------------------------------------------------

/// UTF-8 byte-order mark; spreadsheet tools need it to detect the encoding
/// of the exported file (the `utf_8_sig` convention).
const BOM: &str = "\u{FEFF}";

/// Name of the export file for a given classification.
pub fn export_file_name(classification: &str) -> String {
    format!("篩選結果_{classification}.csv")
}

/// Serialize a table as CSV: header row of column names, one row per record,
/// missing values as empty fields. `with_bom` prefixes the byte-order mark.
pub fn write_csv<W: Write>(table: &NormalizedTable, mut writer: W, with_bom: bool) -> Result<()> {
    if with_bom {
        writer.write_all(BOM.as_bytes()).context("writing BOM")?;
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&table.columns).context("writing CSV header")?;
    for i in 0..table.len() {
        let row = table.columns.iter().map(|c| table.value(i, c).to_string());
        csv.write_record(row)
            .with_context(|| format!("writing CSV record {i}"))?;
    }
    csv.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the classification's export file into `dir` and return its path.
pub fn export_to_dir(
    table: &NormalizedTable,
    classification: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(classification));
    let file = File::create(&path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_csv(table, file, true)?;
    info!("exported {} records to {}", table.len(), path.display());
    Ok(path)
}

/// Serialize the table's records as a JSON array of objects.
pub fn to_json(table: &NormalizedTable) -> Result<String> {
    serde_json::to_string_pretty(&table.records).context("serializing records to JSON")
}
