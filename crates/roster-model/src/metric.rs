use serde::{Deserialize, Serialize};

use crate::ids::MetricId;

/// A custom performance metric defined by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub id: MetricId,
    pub name: String,
    pub unit: String,
    /// Timed events rank ascending; display hint only.
    #[serde(default)]
    pub lower_is_better: bool,
}

impl MetricDefinition {
    pub fn new(id: MetricId, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
            lower_is_better: false,
        }
    }
}
