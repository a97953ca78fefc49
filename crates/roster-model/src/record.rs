//! Reconciliation outputs: records, deferred rows, and per-row issues.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{AthleteId, MetricId};
use crate::roster::NameKey;

/// One measurement ready for bulk insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub athlete_id: AthleteId,
    pub metric_id: MetricId,
    pub value: f64,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    pub recorded_date: String,
    #[serde(default)]
    pub notes: String,
}

/// A named person with no roster match, held for the resolution step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRow {
    pub first_name: String,
    pub last_name: String,
    /// First source row that referenced this person.
    pub raw_row: Vec<String>,
    /// All 1-based data row numbers naming this person.
    pub row_numbers: Vec<usize>,
}

impl UnresolvedRow {
    pub fn name_key(&self) -> NameKey {
        NameKey::new(&self.first_name, &self.last_name)
    }
}

/// Why a row (or a single cell of it) produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingName,
    MissingDate,
    InvalidDate {
        value: String,
    },
    InvalidNumber {
        column: usize,
        metric_id: MetricId,
        value: String,
    },
    AmbiguousAthlete {
        candidates: Vec<AthleteId>,
    },
    NoValues,
}

impl SkipReason {
    /// True when the whole row was dropped rather than a single cell.
    pub fn drops_row(&self) -> bool {
        !matches!(self, Self::InvalidNumber { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("first or last name is empty"),
            Self::MissingDate => f.write_str("no date in row and no default date"),
            Self::InvalidDate { value } => write!(f, "unrecognized date '{value}'"),
            Self::InvalidNumber {
                column,
                metric_id,
                value,
            } => write!(
                f,
                "'{value}' for {metric_id} (column {}) is not a number",
                column + 1
            ),
            Self::AmbiguousAthlete { candidates } => {
                write!(f, "name matches {} roster entries", candidates.len())
            }
            Self::NoValues => f.write_str("no metric values in row"),
        }
    }
}

/// A skipped row or cell, keyed by its 1-based data row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row_number: usize,
    pub reason: SkipReason,
}

impl RowIssue {
    pub fn new(row_number: usize, reason: SkipReason) -> Self {
        Self { row_number, reason }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row_number, self.reason)
    }
}
