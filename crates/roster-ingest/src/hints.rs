//! Per-column statistics used to flag suspicious mappings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::csv::CsvTable;

/// Characteristics of one CSV column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnHint {
    /// True if every non-blank cell parses as a finite number.
    pub is_numeric: bool,
    /// Share of non-blank cells that parse as finite numbers (0.0 to 1.0).
    pub numeric_ratio: f64,
    /// Ratio of unique values to non-blank cells (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of blank cells to rows (0.0 to 1.0).
    pub null_ratio: f64,
}

/// Builds one hint per header column, in column order.
pub fn build_column_hints(table: &CsvTable) -> Vec<ColumnHint> {
    let row_count = table.rows.len();
    let mut hints = Vec::with_capacity(table.width());
    for col_idx in 0..table.width() {
        let mut non_null = 0usize;
        let mut numeric = 0usize;
        let mut uniques = BTreeSet::new();
        for row in &table.rows {
            let trimmed = row.get(col_idx).map(|v| v.trim()).unwrap_or("");
            if trimmed.is_empty() {
                continue;
            }
            non_null += 1;
            uniques.insert(trimmed);
            if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
                numeric += 1;
            }
        }
        let null_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count - non_null) as f64 / row_count as f64
        };
        let (unique_ratio, numeric_ratio) = if non_null == 0 {
            (0.0, 0.0)
        } else {
            (
                uniques.len() as f64 / non_null as f64,
                numeric as f64 / non_null as f64,
            )
        };
        hints.push(ColumnHint {
            is_numeric: non_null > 0 && numeric == non_null,
            numeric_ratio,
            unique_ratio,
            null_ratio,
        });
    }
    hints
}
