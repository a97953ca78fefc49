//! CSV ingestion for roster imports.

pub mod csv;
pub mod error;
pub mod hints;

pub use crate::csv::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, parse,
    parse_csv_line, parse_table, read_csv_table, read_csv_text, validate_encoding,
};
pub use error::{IngestError, Result};
pub use hints::{ColumnHint, build_column_hints};
