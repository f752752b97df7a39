use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use log::debug;

use super::model::{CellValue, RawSheet};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Workbook ingestion
// ---------------------------------------------------------------------------

/// List the worksheets discoverable in an uploaded workbook.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>, Error> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read one worksheet into a dense grid in absolute sheet coordinates.
///
/// calamine ranges start at the first used cell, so the grid is re-padded
/// with `Missing` up to row/column zero; the normalizer's fixed leading-row
/// skip counts from the top of the sheet, not the top of the used range.
pub fn read_sheet(bytes: &[u8], sheet_name: &str) -> Result<RawSheet, Error> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Err(Error::SheetNotFound(sheet_name.to_string()));
    }
    let range = workbook.worksheet_range(sheet_name)?;

    let Some(end) = range.end() else {
        return Ok(RawSheet::new());
    };
    let (n_rows, n_cols) = (end.0 as usize + 1, end.1 as usize + 1);

    let mut grid = Vec::with_capacity(n_rows);
    for r in 0..n_rows {
        let mut row = Vec::with_capacity(n_cols);
        for c in 0..n_cols {
            let value = range
                .get_value((r as u32, c as u32))
                .map(convert_cell)
                .unwrap_or(CellValue::Missing);
            row.push(value);
        }
        grid.push(row);
    }

    debug!("read sheet '{sheet_name}': {n_rows} rows x {n_cols} cols");
    Ok(grid)
}

/// Map a calamine cell onto our value model.
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::from_text(s),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        // Dates never participate in filtering; the serial number is enough.
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Error(_) | Data::Empty => CellValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_conversion_covers_export_types() {
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Integer(3));
        assert_eq!(convert_cell(&Data::Float(1.25)), CellValue::Float(1.25));
        assert_eq!(
            convert_cell(&Data::String("基金".to_string())),
            CellValue::Text("基金".to_string())
        );
        assert_eq!(convert_cell(&Data::String("  ".to_string())), CellValue::Missing);
        assert_eq!(convert_cell(&Data::Empty), CellValue::Missing);
    }

    #[test]
    fn bad_bytes_are_a_workbook_error() {
        let err = sheet_names(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, Error::Workbook(_)));
    }
}
