//! JSON-file backed store.
//!
//! Layout: `<root>/<organization>/{athletes,metrics,records}.json`, each a
//! JSON array. Missing files read as empty.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use roster_model::{
    ImportContext, ImportRecord, MetricDefinition, NewAthlete, OrganizationId, RosterEntry,
};

use crate::directory::{AthleteDirectory, RecordSink};
use crate::error::{Result, StoreError};
use crate::{build_entry, validate_new_athlete};

const ATHLETES_FILE: &str = "athletes.json";
const METRICS_FILE: &str = "metrics.json";
const RECORDS_FILE: &str = "records.json";

/// Store rooted at a directory on disk.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn org_dir(&self, org: &OrganizationId) -> PathBuf {
        self.root.join(org.as_str())
    }

    fn load<T: DeserializeOwned>(&self, org: &OrganizationId, file: &str) -> Result<Vec<T>> {
        let path = self.org_dir(org).join(file);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save<T: Serialize>(&self, org: &OrganizationId, file: &str, items: &[T]) -> Result<()> {
        let dir = self.org_dir(org);
        fs::create_dir_all(&dir)?;
        let path = dir.join(file);
        let tmp = dir.join(format!("{file}.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), items = items.len(), "saved store file");
        Ok(())
    }

    /// Adds or replaces a metric definition by id.
    pub fn upsert_metric(&self, ctx: &ImportContext, metric: MetricDefinition) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let org = &ctx.organization_id;
        let mut metrics: Vec<MetricDefinition> = self.load(org, METRICS_FILE)?;
        match metrics.iter_mut().find(|m| m.id == metric.id) {
            Some(existing) => *existing = metric,
            None => metrics.push(metric),
        }
        self.save(org, METRICS_FILE, &metrics)
    }

    /// All records written for the context's organization.
    pub fn list_records(&self, ctx: &ImportContext) -> Result<Vec<ImportRecord>> {
        self.load(&ctx.organization_id, RECORDS_FILE)
    }
}

impl AthleteDirectory for FileStore {
    fn list_athletes(&self, ctx: &ImportContext) -> Result<Vec<RosterEntry>> {
        self.load(&ctx.organization_id, ATHLETES_FILE)
    }

    fn list_metrics(&self, ctx: &ImportContext) -> Result<Vec<MetricDefinition>> {
        self.load(&ctx.organization_id, METRICS_FILE)
    }

    fn create_athlete(&self, ctx: &ImportContext, athlete: NewAthlete) -> Result<RosterEntry> {
        validate_new_athlete(&athlete)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let org = &ctx.organization_id;
        let mut athletes: Vec<RosterEntry> = self.load(org, ATHLETES_FILE)?;
        let entry = build_entry(&athletes, athlete)?;
        athletes.push(entry.clone());
        self.save(org, ATHLETES_FILE, &athletes)?;
        Ok(entry)
    }
}

impl RecordSink for FileStore {
    async fn insert_batch(&self, ctx: &ImportContext, batch: &[ImportRecord]) -> Result<usize> {
        if batch.iter().any(|r| !r.value.is_finite()) {
            return Err(StoreError::Rejected("non-finite record value".to_string()));
        }
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let org = &ctx.organization_id;
        let mut records: Vec<ImportRecord> = self.load(org, RECORDS_FILE)?;
        records.extend_from_slice(batch);
        self.save(org, RECORDS_FILE, &records)?;
        Ok(batch.len())
    }
}
