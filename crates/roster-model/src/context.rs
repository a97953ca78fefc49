use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::OrganizationId;

/// Explicit scope for one reconciliation, detection, or store call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportContext {
    pub organization_id: OrganizationId,
    /// Used for rows whose date cell is blank or unmapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_date: Option<NaiveDate>,
    /// Used for records whose notes cell is blank or unmapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_notes: Option<String>,
}

impl ImportContext {
    pub fn new(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            default_date: None,
            default_notes: None,
        }
    }

    #[must_use]
    pub fn with_default_date(mut self, date: NaiveDate) -> Self {
        self.default_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_default_notes(mut self, notes: impl Into<String>) -> Self {
        self.default_notes = Some(notes.into());
        self
    }
}
