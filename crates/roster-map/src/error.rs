//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Column index past the header row.
    #[error("column {index} is out of range ({width} columns)")]
    ColumnOutOfRange { index: usize, width: usize },
    /// No header with this name.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    /// Field key not among the known field specs.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// Required fields left unmapped.
    #[error("required fields not mapped: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
    /// Override string is not `HEADER=field`.
    #[error("invalid mapping override '{0}', expected HEADER=field")]
    InvalidOverride(String),
}

pub type Result<T> = std::result::Result<T, MappingError>;
