//! One upload session: parsed table, confirmed mapping, and roster snapshot.

use serde::Serialize;
use tracing::info;

use roster_ingest::CsvTable;
use roster_map::MappingState;
use roster_model::{ColumnMapping, ImportContext, RosterEntry, UnresolvedRow};
use roster_store::AthleteDirectory;

use crate::error::{ReconcileError, Result};
use crate::reconciler::{Reconciliation, reconcile};
use crate::resolution::{Resolution, ResolutionOutcome, resolve_unresolved};

/// Result of [`ImportSession::apply_resolutions`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub resolution: ResolutionOutcome,
    /// Reconciliation re-run against the extended roster.
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Clone)]
pub struct ImportSession {
    ctx: ImportContext,
    table: CsvTable,
    mapping: ColumnMapping,
    roster: Vec<RosterEntry>,
}

fn mapped_columns(mapping: &ColumnMapping) -> impl Iterator<Item = usize> + '_ {
    [mapping.first_name_col, mapping.last_name_col]
        .into_iter()
        .chain(mapping.date_col)
        .chain(mapping.email_col)
        .chain(mapping.pin_col)
        .chain(mapping.notes_col)
        .chain(mapping.metric_columns.keys().copied())
}

impl ImportSession {
    /// Validates the mapping against the table and takes ownership of the inputs.
    pub fn new(
        ctx: ImportContext,
        table: CsvTable,
        mapping: ColumnMapping,
        roster: Vec<RosterEntry>,
    ) -> Result<Self> {
        if mapping.metric_columns.is_empty() {
            return Err(ReconcileError::NoMetricColumns);
        }
        let width = table.width();
        if let Some(column) = mapped_columns(&mapping).find(|&c| c >= width) {
            return Err(ReconcileError::ColumnOutOfRange { column, width });
        }
        Ok(Self {
            ctx,
            table,
            mapping,
            roster,
        })
    }

    /// Like [`ImportSession::new`], snapshotting the roster from `directory`.
    pub fn load<D: AthleteDirectory + ?Sized>(
        directory: &D,
        ctx: ImportContext,
        table: CsvTable,
        mapping: ColumnMapping,
    ) -> Result<Self> {
        let roster = directory.list_athletes(&ctx)?;
        info!(athletes = roster.len(), rows = table.rows.len(), "import session loaded");
        Self::new(ctx, table, mapping, roster)
    }

    /// Builds a session from a confirmed [`MappingState`].
    pub fn from_state<D: AthleteDirectory + ?Sized>(
        directory: &D,
        ctx: ImportContext,
        table: CsvTable,
        state: &MappingState,
    ) -> Result<Self> {
        let mapping = state.to_column_mapping()?;
        Self::load(directory, ctx, table, mapping)
    }

    pub fn context(&self) -> &ImportContext {
        &self.ctx
    }

    pub fn table(&self) -> &CsvTable {
        &self.table
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn reconcile(&self) -> Reconciliation {
        reconcile(&self.table.rows, &self.mapping, &self.roster, &self.ctx)
    }

    /// Resolves unknown athletes, then reconciles again against the extended roster.
    ///
    /// Skipped athletes remain in the returned reconciliation's `unresolved`.
    pub fn apply_resolutions<D, F>(&mut self, directory: &D, decide: F) -> Result<SessionOutcome>
    where
        D: AthleteDirectory + ?Sized,
        F: FnMut(&UnresolvedRow) -> Resolution,
    {
        let first_pass = self.reconcile();
        let resolution = resolve_unresolved(
            directory,
            &self.ctx,
            &first_pass.unresolved,
            &self.mapping,
            decide,
        )?;
        self.roster.extend(resolution.created.iter().cloned());
        let reconciliation = self.reconcile();
        Ok(SessionOutcome {
            resolution,
            reconciliation,
        })
    }
}
