//! The single CSV tokenizer shared by every upload path.
//!
//! Quoted fields may contain commas, newlines and doubled quotes. Cells are
//! trimmed and rows whose cells are all blank are dropped.

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Splits raw CSV text into trimmed rows of cells.
pub fn parse(text: &str) -> Result<Vec<Vec<String>>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| IngestError::CsvParse {
            line: err.position().map_or(0, csv::Position::line),
            message: err.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Tokenizes a single line; a line that is blank yields no cells.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    parse(line)
        .ok()
        .and_then(|rows| rows.into_iter().next())
        .unwrap_or_default()
}
