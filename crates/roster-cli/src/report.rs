//! Serializable outcome of an import run.

use std::path::PathBuf;

use serde::Serialize;

use roster_model::RosterEntry;
use roster_reconcile::Reconciliation;
use roster_store::UploadReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedBatchSummary {
    pub index: usize,
    pub records: usize,
    pub attempts: u32,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadSummary {
    pub batches: usize,
    pub inserted: usize,
    pub retries: u32,
    pub failed_batches: Vec<FailedBatchSummary>,
}

impl From<&UploadReport> for UploadSummary {
    fn from(report: &UploadReport) -> Self {
        Self {
            batches: report.batches,
            inserted: report.inserted,
            retries: report.retries,
            failed_batches: report
                .failed_batches
                .iter()
                .map(|batch| FailedBatchSummary {
                    index: batch.index,
                    records: batch.records,
                    attempts: batch.attempts,
                    error: batch.error.to_string(),
                })
                .collect(),
        }
    }
}

impl UploadSummary {
    pub fn failed_records(&self) -> usize {
        self.failed_batches.iter().map(|b| b.records).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub file: PathBuf,
    pub organization: String,
    pub rows: usize,
    pub dry_run: bool,
    /// Data rows whose cells past the last header were ignored.
    pub truncated_rows: Vec<usize>,
    pub reconciliation: Reconciliation,
    /// Athletes added to the roster during resolution.
    pub created: Vec<RosterEntry>,
    /// `None` for dry runs.
    pub upload: Option<UploadSummary>,
}

impl ImportReport {
    /// True when at least one batch was not written.
    pub fn has_failed_batches(&self) -> bool {
        self.upload
            .as_ref()
            .is_some_and(|upload| !upload.failed_batches.is_empty())
    }
}
