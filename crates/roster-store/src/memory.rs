//! In-memory store used by tests and dry runs.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use roster_model::{
    ImportContext, ImportRecord, MetricDefinition, NewAthlete, OrganizationId, RosterEntry,
};

use crate::directory::{AthleteDirectory, RecordSink};
use crate::error::{Result, StoreError};
use crate::{build_entry, validate_new_athlete};

#[derive(Debug, Default, Clone)]
struct OrgData {
    athletes: Vec<RosterEntry>,
    metrics: Vec<MetricDefinition>,
    records: Vec<ImportRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    orgs: BTreeMap<OrganizationId, OrgData>,
    pending_failures: VecDeque<StoreError>,
    insert_calls: usize,
}

/// Thread-safe in-memory [`AthleteDirectory`] and [`RecordSink`].
///
/// Failures queued with [`MemoryStore::push_failure`] are returned by the
/// next `insert_batch` calls, one per call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn with_athletes(self, org: &OrganizationId, athletes: Vec<RosterEntry>) -> Self {
        self.lock()
            .orgs
            .entry(org.clone())
            .or_default()
            .athletes
            .extend(athletes);
        self
    }

    #[must_use]
    pub fn with_metrics(self, org: &OrganizationId, metrics: Vec<MetricDefinition>) -> Self {
        self.lock()
            .orgs
            .entry(org.clone())
            .or_default()
            .metrics
            .extend(metrics);
        self
    }

    /// Queue an error for the next `insert_batch` call.
    pub fn push_failure(&self, error: StoreError) {
        self.lock().pending_failures.push_back(error);
    }

    /// Records written so far for `org`.
    pub fn records(&self, org: &OrganizationId) -> Vec<ImportRecord> {
        self.lock()
            .orgs
            .get(org)
            .map(|data| data.records.clone())
            .unwrap_or_default()
    }

    /// Number of `insert_batch` calls, including failed ones.
    pub fn insert_calls(&self) -> usize {
        self.lock().insert_calls
    }
}

impl AthleteDirectory for MemoryStore {
    fn list_athletes(&self, ctx: &ImportContext) -> Result<Vec<RosterEntry>> {
        Ok(self
            .lock()
            .orgs
            .get(&ctx.organization_id)
            .map(|data| data.athletes.clone())
            .unwrap_or_default())
    }

    fn list_metrics(&self, ctx: &ImportContext) -> Result<Vec<MetricDefinition>> {
        Ok(self
            .lock()
            .orgs
            .get(&ctx.organization_id)
            .map(|data| data.metrics.clone())
            .unwrap_or_default())
    }

    fn create_athlete(&self, ctx: &ImportContext, athlete: NewAthlete) -> Result<RosterEntry> {
        validate_new_athlete(&athlete)?;
        let mut inner = self.lock();
        let data = inner.orgs.entry(ctx.organization_id.clone()).or_default();
        let entry = build_entry(&data.athletes, athlete)?;
        data.athletes.push(entry.clone());
        Ok(entry)
    }
}

impl RecordSink for MemoryStore {
    async fn insert_batch(&self, ctx: &ImportContext, batch: &[ImportRecord]) -> Result<usize> {
        let mut inner = self.lock();
        inner.insert_calls += 1;
        if let Some(error) = inner.pending_failures.pop_front() {
            return Err(error);
        }
        let data = inner.orgs.entry(ctx.organization_id.clone()).or_default();
        data.records.extend_from_slice(batch);
        Ok(batch.len())
    }
}
