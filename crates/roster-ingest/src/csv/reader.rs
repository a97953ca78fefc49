//! CSV file loading with a header row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

use super::tokenizer::parse;

/// Maximum file size for CSV loading (50 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Parsed CSV with the first non-blank row split off as headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 1-based data rows that lost non-blank cells past the header width.
    #[serde(default)]
    pub truncated_rows: Vec<usize>,
}

impl CsvTable {
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn header(&self, col: usize) -> &str {
        self.headers.get(col).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses CSV text into a header row and data rows fitted to the header width.
///
/// Short rows are padded with blanks. Long rows are cut; rows that lose a
/// non-blank cell that way are listed in [`CsvTable::truncated_rows`].
pub fn parse_table(text: &str) -> Result<CsvTable> {
    let mut rows = parse(text)?.into_iter();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyCsv);
    };
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let width = headers.len();
    let mut truncated_rows = Vec::new();
    let rows = rows
        .enumerate()
        .map(|(i, mut row)| {
            if row.iter().skip(width).any(|c| !c.is_empty()) {
                truncated_rows.push(i + 1);
            }
            row.resize(width, String::new());
            row
        })
        .collect();
    if !truncated_rows.is_empty() {
        tracing::warn!(
            rows = truncated_rows.len(),
            columns = width,
            "cells beyond the header width were ignored"
        );
    }
    Ok(CsvTable {
        headers,
        rows,
        truncated_rows,
    })
}

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input; spreadsheet exports sometimes default to it.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads a CSV file as text after size and encoding checks.
pub fn read_csv_text(path: &Path) -> Result<String> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read CSV file");
    Ok(text)
}

/// Reads and parses a CSV file with a header row.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let table = parse_table(&read_csv_text(path)?)?;
    tracing::info!(
        path = %path.display(),
        columns = table.width(),
        rows = table.rows.len(),
        "loaded CSV table"
    );
    Ok(table)
}
