//! Collaborator interface to the external athlete store.

use std::future::Future;

use roster_model::{ImportContext, ImportRecord, MetricDefinition, NewAthlete, RosterEntry};

use crate::error::Result;

/// Roster and metric queries plus athlete creation, scoped by [`ImportContext`].
pub trait AthleteDirectory {
    /// All known athletes for the context's organization.
    fn list_athletes(&self, ctx: &ImportContext) -> Result<Vec<RosterEntry>>;

    /// All metric definitions for the context's organization.
    fn list_metrics(&self, ctx: &ImportContext) -> Result<Vec<MetricDefinition>>;

    /// Creates a roster entry and returns it with its assigned id.
    fn create_athlete(&self, ctx: &ImportContext, athlete: NewAthlete) -> Result<RosterEntry>;
}

/// Bulk record creation.
pub trait RecordSink {
    /// Inserts one batch, returning the number of records written.
    fn insert_batch(
        &self,
        ctx: &ImportContext,
        batch: &[ImportRecord],
    ) -> impl Future<Output = Result<usize>> + Send;
}
