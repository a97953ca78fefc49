//! CSV reading utilities.

mod reader;
mod tokenizer;

pub use reader::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, parse_table,
    read_csv_table, read_csv_text, validate_encoding,
};
pub use tokenizer::{parse, parse_csv_line};
