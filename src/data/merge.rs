use std::collections::BTreeSet;

use super::model::NormalizedTable;
use super::schema::IDENTIFIER_COLUMN;

// ---------------------------------------------------------------------------
// Re-join filtered keys against the full table
// ---------------------------------------------------------------------------

/// Restrict the full normalized table to the identifier keys present in a
/// filtered result, recovering every original column in original order.
///
/// Keys are compared by display value: exports carry Lipper IDs as text or
/// as numbers depending on the period, and a whole-number `Float` key must
/// match its `Integer` form. Non-unique keys are not deduplicated: every
/// matching row is included.
pub fn merge(filtered: &NormalizedTable, table: &NormalizedTable) -> NormalizedTable {
    let keys: BTreeSet<String> = filtered
        .records
        .iter()
        .filter_map(|r| r.get(IDENTIFIER_COLUMN))
        .filter(|v| !v.is_missing())
        .map(|v| v.to_string())
        .collect();

    let records = table
        .records
        .iter()
        .filter(|r| {
            r.get(IDENTIFIER_COLUMN)
                .filter(|v| !v.is_missing())
                .map(|v| keys.contains(&v.to_string()))
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    NormalizedTable {
        columns: table.columns.clone(),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn keyed_table(ids: &[&str], extra_column: &str) -> NormalizedTable {
        let columns = vec![IDENTIFIER_COLUMN.to_string(), extra_column.to_string()];
        let records = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                [
                    (IDENTIFIER_COLUMN.to_string(), CellValue::Text(id.to_string())),
                    (extra_column.to_string(), CellValue::Integer(i as i64)),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        NormalizedTable { columns, records }
    }

    #[test]
    fn merge_recovers_all_original_columns() {
        let full = keyed_table(&["A", "B", "C"], "波動度 1Y");
        let filtered = keyed_table(&["B"], "1M排名");

        let merged = merge(&filtered, &full);
        assert_eq!(merged.columns, full.columns);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.value(0, IDENTIFIER_COLUMN), &CellValue::Text("B".to_string()));
    }

    #[test]
    fn round_trip_key_containment() {
        let full = keyed_table(&["A", "B", "C", "D"], "基金貨幣");
        let filtered = keyed_table(&["D", "B"], "1M排名");

        let merged = merge(&filtered, &full);
        let merged_keys: Vec<&str> = merged
            .records
            .iter()
            .filter_map(|r| r.get(IDENTIFIER_COLUMN).and_then(|v| v.as_str()))
            .collect();

        // Every filtered key appears; no other key does.
        assert_eq!(merged_keys, vec!["B", "D"]);
    }

    #[test]
    fn duplicate_keys_keep_every_matching_row() {
        let full = keyed_table(&["A", "B", "A"], "基金貨幣");
        let filtered = keyed_table(&["A"], "1M排名");

        let merged = merge(&filtered, &full);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn numeric_identifier_keys_join_by_value() {
        // Some export periods carry Lipper IDs as numbers; the worksheet
        // reader surfaces those as Float cells, and rank coercion may turn
        // whole floats into Integer on one side of the join.
        let columns = vec![IDENTIFIER_COLUMN.to_string(), "基金貨幣".to_string()];
        let record = |key: CellValue| -> NormalizedTable {
            NormalizedTable {
                columns: columns.clone(),
                records: vec![[
                    (IDENTIFIER_COLUMN.to_string(), key),
                    ("基金貨幣".to_string(), CellValue::Text("TWD".to_string())),
                ]
                .into_iter()
                .collect()],
            }
        };

        let full = record(CellValue::Float(60000092.0));
        let filtered = record(CellValue::Float(60000092.0));
        assert_eq!(merge(&filtered, &full).len(), 1);

        // Integer vs whole-number Float still matches.
        let coerced = record(CellValue::Integer(60000092));
        assert_eq!(merge(&coerced, &full).len(), 1);
    }

    #[test]
    fn empty_filtered_result_merges_to_empty() {
        let full = keyed_table(&["A", "B"], "基金貨幣");
        let filtered = NormalizedTable::new(vec![IDENTIFIER_COLUMN.to_string()]);

        let merged = merge(&filtered, &full);
        assert!(merged.is_empty());
        assert_eq!(merged.columns, full.columns);
    }
}
