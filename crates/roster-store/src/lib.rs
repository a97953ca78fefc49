//! Athlete store collaborator interface and batch uploader.

pub mod directory;
pub mod error;
pub mod file;
pub mod memory;
pub mod upload;

use roster_model::{AthleteId, NewAthlete, RosterEntry};

pub use directory::{AthleteDirectory, RecordSink};
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use upload::{FailedBatch, UploadOptions, UploadProgress, UploadReport, upload_records};

pub(crate) fn validate_new_athlete(athlete: &NewAthlete) -> Result<()> {
    if athlete.first_name.trim().is_empty() || athlete.last_name.trim().is_empty() {
        return Err(StoreError::Rejected(
            "athlete first and last name are required".to_string(),
        ));
    }
    Ok(())
}

/// Next integer id after the largest numeric id in `existing`.
pub(crate) fn next_athlete_id(existing: &[RosterEntry]) -> Result<AthleteId> {
    let next = existing
        .iter()
        .filter_map(|entry| entry.id.as_str().parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1);
    AthleteId::new(next.to_string()).map_err(|err| StoreError::Rejected(err.to_string()))
}

pub(crate) fn build_entry(existing: &[RosterEntry], athlete: NewAthlete) -> Result<RosterEntry> {
    Ok(RosterEntry {
        id: next_athlete_id(existing)?,
        first_name: athlete.first_name.trim().to_string(),
        last_name: athlete.last_name.trim().to_string(),
        email: athlete.email,
        pin: athlete.pin,
        team_ids: athlete.team_ids,
    })
}
