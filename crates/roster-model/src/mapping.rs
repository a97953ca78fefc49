//! Field specifications and the confirmed column mapping for one upload.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::MetricId;

/// Domain field a CSV column can be mapped to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    FirstName,
    LastName,
    Date,
    Email,
    Pin,
    Notes,
    Metric(MetricId),
}

impl FieldKey {
    /// Stable textual key (`first_name`, ..., or the metric id).
    pub fn as_key(&self) -> &str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Date => "date",
            Self::Email => "email",
            Self::Pin => "pin",
            Self::Notes => "notes",
            Self::Metric(id) => id.as_str(),
        }
    }

    pub fn is_metric(&self) -> bool {
        matches!(self, Self::Metric(_))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A mappable field with its display label and header aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: String,
    pub required: bool,
    /// Extra header spellings recognized by auto-mapping.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FieldSpec {
    pub fn new(key: FieldKey, label: impl Into<String>, required: bool) -> Self {
        Self {
            key,
            label: label.into(),
            required,
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// Confirmed association of CSV column indices with domain fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub first_name_col: usize,
    pub last_name_col: usize,
    pub date_col: Option<usize>,
    pub email_col: Option<usize>,
    pub pin_col: Option<usize>,
    pub notes_col: Option<usize>,
    pub metric_columns: BTreeMap<usize, MetricId>,
}

impl ColumnMapping {
    pub fn new(first_name_col: usize, last_name_col: usize) -> Self {
        Self {
            first_name_col,
            last_name_col,
            date_col: None,
            email_col: None,
            pin_col: None,
            notes_col: None,
            metric_columns: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_date(mut self, col: usize) -> Self {
        self.date_col = Some(col);
        self
    }

    #[must_use]
    pub fn with_email(mut self, col: usize) -> Self {
        self.email_col = Some(col);
        self
    }

    #[must_use]
    pub fn with_pin(mut self, col: usize) -> Self {
        self.pin_col = Some(col);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, col: usize) -> Self {
        self.notes_col = Some(col);
        self
    }

    #[must_use]
    pub fn with_metric(mut self, col: usize, metric: MetricId) -> Self {
        self.metric_columns.insert(col, metric);
        self
    }
}

/// Returns the trimmed cell at `col`, or `""` when the row is short.
pub fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(|value| value.trim()).unwrap_or("")
}

/// Like [`cell`] but `None` for unmapped columns and blank cells.
pub fn optional_cell(row: &[String], col: Option<usize>) -> Option<&str> {
    let value = cell(row, col?);
    if value.is_empty() { None } else { Some(value) }
}
