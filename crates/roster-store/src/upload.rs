//! Bounded-concurrency batch uploader with exponential backoff.
//!
//! Records are chunked into batches and at most `max_in_flight` batches are
//! outstanding at once. Retryable failures back off exponentially; a batch
//! that still fails is reported and the remaining batches carry on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use roster_model::{ImportContext, ImportRecord};

use crate::directory::RecordSink;
use crate::error::StoreError;

/// Uploader tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadOptions {
    /// Records per `insert_batch` call.
    pub batch_size: usize,
    /// Maximum batches outstanding at once.
    pub max_in_flight: usize,
    /// Retries per batch after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, doubled per attempt.
    pub base_delay_ms: u64,
    /// Upper bound for computed delays.
    pub max_delay_ms: u64,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            batch_size: 50,
            max_in_flight: 4,
            max_retries: 5,
            base_delay_ms: 250,
            max_delay_ms: 10_000,
        }
    }
}

impl UploadOptions {
    /// Delay before retry number `attempt` (0-based).
    ///
    /// A server `retry_after` hint wins when it is longer than the computed
    /// delay. Both are capped at `max_delay_ms`.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let factor = 1u64 << attempt.min(20);
        let cap = Duration::from_millis(self.max_delay_ms);
        let computed = Duration::from_millis(self.base_delay_ms.saturating_mul(factor)).min(cap);
        match retry_after {
            Some(hint) if hint > computed => hint.min(cap),
            _ => computed,
        }
    }
}

/// A batch that was not written.
#[derive(Debug)]
pub struct FailedBatch {
    /// 0-based batch position.
    pub index: usize,
    /// Records in the batch.
    pub records: usize,
    /// Attempts made, including the first.
    pub attempts: u32,
    pub error: StoreError,
}

/// Outcome of an upload run.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub batches: usize,
    pub inserted: usize,
    pub retries: u32,
    pub failed_batches: Vec<FailedBatch>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed_batches.is_empty()
    }

    pub fn failed_records(&self) -> usize {
        self.failed_batches.iter().map(|b| b.records).sum()
    }
}

/// Receives per-batch notifications (progress bars, logs).
pub trait UploadProgress {
    fn batch_finished(&self, records: usize, succeeded: bool);
}

impl UploadProgress for () {
    fn batch_finished(&self, _records: usize, _succeeded: bool) {}
}

struct BatchOutcome {
    inserted: usize,
    retries: u32,
    failure: Option<FailedBatch>,
}

async fn upload_batch<S: RecordSink + ?Sized>(
    sink: &S,
    ctx: &ImportContext,
    index: usize,
    batch: &[ImportRecord],
    options: &UploadOptions,
    cancel: &AtomicBool,
) -> BatchOutcome {
    let mut attempt: u32 = 0;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return BatchOutcome {
                inserted: 0,
                retries: attempt,
                failure: Some(FailedBatch {
                    index,
                    records: batch.len(),
                    attempts: attempt,
                    error: StoreError::Cancelled,
                }),
            };
        }
        match sink.insert_batch(ctx, batch).await {
            Ok(inserted) => {
                debug!(batch = index, inserted, attempt, "batch written");
                return BatchOutcome {
                    inserted,
                    retries: attempt,
                    failure: None,
                };
            }
            Err(error) if error.is_retryable() && attempt < options.max_retries => {
                let delay = options.backoff_delay(attempt, error.retry_after());
                warn!(
                    batch = index,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "retrying batch"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => {
                warn!(batch = index, attempts = attempt + 1, %error, "batch failed");
                return BatchOutcome {
                    inserted: 0,
                    retries: attempt,
                    failure: Some(FailedBatch {
                        index,
                        records: batch.len(),
                        attempts: attempt + 1,
                        error,
                    }),
                };
            }
        }
    }
}

/// Uploads `records` through `sink`.
///
/// Setting `cancel` stops new attempts; unwritten batches are reported as
/// [`StoreError::Cancelled`]. Already-written batches are not rolled back.
pub async fn upload_records<S, P>(
    sink: &S,
    ctx: &ImportContext,
    records: &[ImportRecord],
    options: &UploadOptions,
    cancel: &AtomicBool,
    progress: &P,
) -> UploadReport
where
    S: RecordSink + ?Sized,
    P: UploadProgress + ?Sized,
{
    let batch_size = options.batch_size.max(1);
    let max_in_flight = options.max_in_flight.max(1);
    let mut report = UploadReport::default();

    let mut outcomes = stream::iter(records.chunks(batch_size).enumerate())
        .map(|(index, batch)| upload_batch(sink, ctx, index, batch, options, cancel))
        .buffer_unordered(max_in_flight);

    while let Some(outcome) = outcomes.next().await {
        report.batches += 1;
        report.inserted += outcome.inserted;
        report.retries += outcome.retries;
        match outcome.failure {
            Some(failure) => {
                progress.batch_finished(failure.records, false);
                report.failed_batches.push(failure);
            }
            None => progress.batch_finished(outcome.inserted, true),
        }
    }
    report.failed_batches.sort_by_key(|b| b.index);

    info!(
        records = records.len(),
        batches = report.batches,
        inserted = report.inserted,
        failed_batches = report.failed_batches.len(),
        retries = report.retries,
        "upload finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let options = UploadOptions {
            base_delay_ms: 100,
            max_delay_ms: 1_000,
            ..UploadOptions::default()
        };
        assert_eq!(options.backoff_delay(0, None), Duration::from_millis(100));
        assert_eq!(options.backoff_delay(1, None), Duration::from_millis(200));
        assert_eq!(options.backoff_delay(3, None), Duration::from_millis(800));
        assert_eq!(options.backoff_delay(4, None), Duration::from_millis(1_000));
        assert_eq!(options.backoff_delay(60, None), Duration::from_millis(1_000));
    }

    #[test]
    fn retry_after_hint_wins_when_longer() {
        let options = UploadOptions {
            base_delay_ms: 100,
            ..UploadOptions::default()
        };
        assert_eq!(
            options.backoff_delay(0, Some(Duration::from_secs(2))),
            Duration::from_secs(2)
        );
        assert_eq!(
            options.backoff_delay(2, Some(Duration::from_millis(10))),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn retry_after_hint_is_capped() {
        let options = UploadOptions {
            base_delay_ms: 100,
            max_delay_ms: 1_000,
            ..UploadOptions::default()
        };
        assert_eq!(
            options.backoff_delay(0, Some(Duration::from_secs(3_600))),
            Duration::from_millis(1_000)
        );
    }
}
