//! Mapping state for the confirm-mapping step.
//!
//! Starts from [`auto_map`] suggestions; the user may then reassign or clear
//! columns one at a time before converting to a [`ColumnMapping`].

use std::collections::BTreeMap;

use roster_model::{ColumnMapping, FieldKey, FieldSpec};

use crate::engine::auto_map;
use crate::error::{MappingError, Result};
use crate::fields::find_field;

/// Editable column → field assignments for one upload.
#[derive(Debug, Clone)]
pub struct MappingState {
    /// Header row of the upload.
    pub headers: Vec<String>,
    /// Fields the user can choose from.
    pub fields: Vec<FieldSpec>,
    assignments: BTreeMap<usize, FieldKey>,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Number of header columns.
    pub total_columns: usize,
    /// Columns with a field assigned.
    pub mapped: usize,
    /// Columns mapped to a metric.
    pub metric_columns: usize,
    /// Total required fields.
    pub required_total: usize,
    /// Required fields that are mapped.
    pub required_mapped: usize,
}

impl MappingState {
    /// Create a state seeded with auto-mapped suggestions.
    pub fn new(headers: Vec<String>, fields: Vec<FieldSpec>) -> Self {
        let assignments = auto_map(&headers, &fields);
        Self {
            headers,
            fields,
            assignments,
        }
    }

    /// Create a state with no assignments.
    pub fn empty(headers: Vec<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            headers,
            fields,
            assignments: BTreeMap::new(),
        }
    }

    pub fn assignments(&self) -> &BTreeMap<usize, FieldKey> {
        &self.assignments
    }

    pub fn field_for(&self, column: usize) -> Option<&FieldKey> {
        self.assignments.get(&column)
    }

    pub fn column_for(&self, field: &FieldKey) -> Option<usize> {
        self.assignments
            .iter()
            .find_map(|(col, key)| (key == field).then_some(*col))
    }

    /// Assign `field` to `column`, moving it off any other column.
    pub fn assign(&mut self, column: usize, field: FieldKey) -> Result<()> {
        if column >= self.headers.len() {
            return Err(MappingError::ColumnOutOfRange {
                index: column,
                width: self.headers.len(),
            });
        }
        if !self.fields.iter().any(|f| f.key == field) {
            return Err(MappingError::UnknownField(field.to_string()));
        }
        self.assignments.retain(|_, key| *key != field);
        self.assignments.insert(column, field);
        Ok(())
    }

    /// Remove the assignment for `column`; returns whether one existed.
    pub fn clear(&mut self, column: usize) -> bool {
        self.assignments.remove(&column).is_some()
    }

    /// Header-addressed override: `field` may be a key or label, or `skip`/`-` to clear.
    pub fn apply_override(&mut self, header: &str, field: &str) -> Result<()> {
        let column = self
            .headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(header.trim()))
            .ok_or_else(|| MappingError::ColumnNotFound(header.to_string()))?;
        let field = field.trim();
        if field == "-" || field.eq_ignore_ascii_case("skip") {
            self.clear(column);
            return Ok(());
        }
        let key = find_field(&self.fields, field)
            .map(|spec| spec.key.clone())
            .ok_or_else(|| MappingError::UnknownField(field.to_string()))?;
        self.assign(column, key)
    }

    /// Header columns with no field assigned.
    pub fn unmapped_columns(&self) -> Vec<usize> {
        (0..self.headers.len())
            .filter(|col| !self.assignments.contains_key(col))
            .collect()
    }

    /// Labels of required fields with no column.
    pub fn missing_required(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required && self.column_for(&f.key).is_none())
            .map(|f| f.label.clone())
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        let required_total = self.fields.iter().filter(|f| f.required).count();
        MappingSummary {
            total_columns: self.headers.len(),
            mapped: self.assignments.len(),
            metric_columns: self.assignments.values().filter(|k| k.is_metric()).count(),
            required_total,
            required_mapped: required_total - self.missing_required().len(),
        }
    }

    /// Convert to the confirmed mapping; fails when a required field is unmapped.
    pub fn to_column_mapping(&self) -> Result<ColumnMapping> {
        let missing = self.missing_required();
        let (Some(first), Some(last)) = (
            self.column_for(&FieldKey::FirstName),
            self.column_for(&FieldKey::LastName),
        ) else {
            return Err(MappingError::MissingRequired(missing));
        };
        if !missing.is_empty() {
            return Err(MappingError::MissingRequired(missing));
        }
        let mut mapping = ColumnMapping::new(first, last);
        for (col, key) in &self.assignments {
            match key {
                FieldKey::FirstName | FieldKey::LastName => {}
                FieldKey::Date => mapping.date_col = Some(*col),
                FieldKey::Email => mapping.email_col = Some(*col),
                FieldKey::Pin => mapping.pin_col = Some(*col),
                FieldKey::Notes => mapping.notes_col = Some(*col),
                FieldKey::Metric(id) => {
                    mapping.metric_columns.insert(*col, id.clone());
                }
            }
        }
        Ok(mapping)
    }
}

/// Splits a `HEADER=field` override string.
pub fn parse_override(raw: &str) -> Result<(String, String)> {
    let (header, field) = raw
        .rsplit_once('=')
        .ok_or_else(|| MappingError::InvalidOverride(raw.to_string()))?;
    if header.trim().is_empty() || field.trim().is_empty() {
        return Err(MappingError::InvalidOverride(raw.to_string()));
    }
    Ok((header.trim().to_string(), field.trim().to_string()))
}
