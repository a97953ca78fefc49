//! Human-in-the-loop resolution of athletes missing from the roster.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use roster_model::{
    ColumnMapping, ImportContext, NewAthlete, RosterEntry, UnresolvedRow, optional_cell,
};
use roster_store::AthleteDirectory;

use crate::error::Result;

/// Decision for one unresolved athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Add the athlete to the roster and import their rows.
    Create,
    /// Leave their rows out of the import.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionOutcome {
    pub created: Vec<RosterEntry>,
    pub skipped: Vec<UnresolvedRow>,
}

/// Builds the creation payload, carrying email and PIN from the first source row.
pub fn new_athlete_from(row: &UnresolvedRow, mapping: &ColumnMapping) -> NewAthlete {
    NewAthlete {
        first_name: row.first_name.trim().to_string(),
        last_name: row.last_name.trim().to_string(),
        email: optional_cell(&row.raw_row, mapping.email_col).map(str::to_string),
        pin: optional_cell(&row.raw_row, mapping.pin_col).map(str::to_string),
        team_ids: Vec::new(),
    }
}

/// Applies `decide` to each unresolved athlete, creating the accepted ones.
///
/// Stops at the first store error; athletes created before it stay created.
pub fn resolve_unresolved<D, F>(
    directory: &D,
    ctx: &ImportContext,
    unresolved: &[UnresolvedRow],
    mapping: &ColumnMapping,
    mut decide: F,
) -> Result<ResolutionOutcome>
where
    D: AthleteDirectory + ?Sized,
    F: FnMut(&UnresolvedRow) -> Resolution,
{
    let mut outcome = ResolutionOutcome::default();
    for row in unresolved {
        match decide(row) {
            Resolution::Create => {
                let entry = directory.create_athlete(ctx, new_athlete_from(row, mapping))?;
                debug!(athlete_id = %entry.id, rows = row.row_numbers.len(), "created athlete");
                outcome.created.push(entry);
            }
            Resolution::Skip => outcome.skipped.push(row.clone()),
        }
    }
    info!(
        created = outcome.created.len(),
        skipped = outcome.skipped.len(),
        "resolution complete"
    );
    Ok(outcome)
}
