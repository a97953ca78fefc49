//! Data model shared by the roster import crates.

pub mod context;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod metric;
pub mod record;
pub mod roster;

pub use context::ImportContext;
pub use error::{ModelError, Result};
pub use ids::{AthleteId, MetricId, OrganizationId};
pub use mapping::{ColumnMapping, FieldKey, FieldSpec, cell, optional_cell};
pub use metric::MetricDefinition;
pub use record::{ImportRecord, RowIssue, SkipReason, UnresolvedRow};
pub use roster::{NameKey, NewAthlete, RosterEntry, email_key, pin_key};
