use log::debug;

use super::model::{CellValue, NormalizedTable, RawSheet, Record};
use super::schema::{SchemaVariant, SheetCategory, IDENTIFIER_COLUMN, LEADING_ROWS};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Table normalization: raw grid → NormalizedTable
// ---------------------------------------------------------------------------

/// Normalize a raw worksheet grid into a named, keyed table.
///
/// In order: skip the fixed banner rows, drop the category's helper column
/// positions, resolve the schema variant from the remaining column count,
/// truncate decorative rows trailing the data block, drop any record whose
/// identifier key is missing, and re-index contiguously.
pub fn normalize(raw: &RawSheet, category: SheetCategory) -> Result<NormalizedTable, Error> {
    let helper = category.helper_columns();

    // Banner rows precede the data block; helper columns are layout filler.
    let rows: Vec<Vec<&CellValue>> = raw
        .iter()
        .skip(LEADING_ROWS)
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(i, _)| !helper.contains(i))
                .map(|(_, v)| v)
                .collect()
        })
        .collect();

    let column_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let variant = SchemaVariant::resolve(category, column_count)?;
    let names = variant.column_names();

    if !names.contains(&IDENTIFIER_COLUMN) {
        return Err(Error::MissingIdentifierColumn {
            column: IDENTIFIER_COLUMN,
        });
    }

    let mut records: Vec<Record> = rows
        .iter()
        .map(|row| {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = row.get(i).map(|v| (*v).clone()).unwrap_or(CellValue::Missing);
                    (name.to_string(), value)
                })
                .collect()
        })
        .collect();

    let has_key =
        |r: &Record| r.get(IDENTIFIER_COLUMN).map(|v| !v.is_missing()).unwrap_or(false);

    // Truncate at the last record with a non-missing identifier (decorative
    // rows below the data block), then drop keyless records inside it.
    while records.last().map(|r| !has_key(r)).unwrap_or(false) {
        records.pop();
    }
    records.retain(has_key);

    debug!(
        "normalized {category} sheet: {} records, variant {variant:?}",
        records.len()
    );

    Ok(NormalizedTable {
        columns: names.iter().map(|n| n.to_string()).collect(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::NAME_COLUMN;

    /// A domestic data row in raw layout: 26 cells, helper columns at 5/6.
    /// `id: None` leaves the identifier blank (banner/footer rows).
    fn raw_domestic_row(id: Option<&str>, name: &str, rank_1m: f64) -> Vec<CellValue> {
        let mut row = vec![
            CellValue::Text("股票型".to_string()),
            id.map(|s| CellValue::Text(s.to_string()))
                .unwrap_or(CellValue::Missing),
            CellValue::Text("TW000T0000A0".to_string()),
            CellValue::Text(name.to_string()),
            CellValue::Text("TWD".to_string()),
            CellValue::Missing, // helper F
            CellValue::Missing, // helper G
        ];
        // 1M return + 1M rank, then the remaining 14 metric cells.
        row.push(CellValue::Float(1.0));
        row.push(CellValue::Float(rank_1m));
        for _ in 0..14 {
            row.push(CellValue::Float(0.0));
        }
        // Three volatility columns.
        for _ in 0..3 {
            row.push(CellValue::Float(0.1));
        }
        assert_eq!(row.len(), 26);
        row
    }

    fn banner_rows() -> RawSheet {
        (0..LEADING_ROWS)
            .map(|_| vec![CellValue::Text("台灣核備銷售基金績效".to_string())])
            .collect()
    }

    #[test]
    fn normalizes_a_domestic_sheet() {
        let mut raw = banner_rows();
        raw.push(raw_domestic_row(Some("6000"), "安泰ING", 3.0));
        raw.push(raw_domestic_row(Some("6001"), "群益馬拉松", 1.0));

        let table = normalize(&raw, SheetCategory::Domestic).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns.len(), 24);
        assert_eq!(
            table.value(0, IDENTIFIER_COLUMN),
            &CellValue::Text("6000".to_string())
        );
        assert_eq!(
            table.value(1, NAME_COLUMN),
            &CellValue::Text("群益馬拉松".to_string())
        );
        assert_eq!(table.value(1, "1M排名"), &CellValue::Float(1.0));
    }

    #[test]
    fn drops_keyless_and_trailing_rows() {
        let mut raw = banner_rows();
        raw.push(raw_domestic_row(Some("6000"), "安泰ING", 3.0));
        raw.push(raw_domestic_row(None, "分類小計", 0.0)); // interior banner
        raw.push(raw_domestic_row(Some("6001"), "群益馬拉松", 1.0));
        raw.push(raw_domestic_row(None, "資料來源：理柏", 0.0)); // footer
        raw.push(raw_domestic_row(None, "", 0.0));

        let table = normalize(&raw, SheetCategory::Domestic).unwrap();
        assert_eq!(table.len(), 2);
        for i in 0..table.len() {
            assert!(!table.value(i, IDENTIFIER_COLUMN).is_missing());
        }
    }

    #[test]
    fn record_count_never_exceeds_input_rows() {
        let mut raw = banner_rows();
        for i in 0..5 {
            raw.push(raw_domestic_row(Some(&format!("60{i:02}")), "基金", i as f64));
        }
        let input_rows = raw.len();
        let table = normalize(&raw, SheetCategory::Domestic).unwrap();
        assert!(table.len() <= input_rows);
    }

    #[test]
    fn unknown_column_count_is_an_error() {
        let mut raw = banner_rows();
        // 22 raw cells → 20 after helper drop would be fine, but 19 is not.
        raw.push(vec![CellValue::Float(0.0); 21]);

        let err = normalize(&raw, SheetCategory::Domestic).unwrap_err();
        match err {
            Error::UnrecognizedSchema { category, count } => {
                assert_eq!(category, SheetCategory::Domestic);
                assert_eq!(count, 19);
            }
            other => panic!("expected UnrecognizedSchema, got {other:?}"),
        }
    }
}
