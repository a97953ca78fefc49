//! Error types for the resolution and session layer.
//!
//! Row-level problems are not errors; they are reported as
//! [`roster_model::RowIssue`]s.

use thiserror::Error;

use roster_map::MappingError;
use roster_store::StoreError;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no metric columns are mapped")]
    NoMetricColumns,

    #[error("mapping references column {column} but the file has {width} columns")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("athlete store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
