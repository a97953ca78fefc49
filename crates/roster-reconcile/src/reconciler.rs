//! Row-to-roster reconciliation.
//!
//! Turns mapped data rows into [`ImportRecord`]s for rows whose athlete is on
//! the roster, collects unknown athletes for the resolution step, and reports
//! every dropped row or cell as a [`RowIssue`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use roster_model::{
    ColumnMapping, ImportContext, ImportRecord, NameKey, RosterEntry, RowIssue, SkipReason,
    UnresolvedRow, cell, optional_cell,
};

use crate::index::RosterIndex;
use crate::values::{format_date, parse_date, parse_number};

/// Output of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reconciliation {
    pub resolved: Vec<ImportRecord>,
    pub unresolved: Vec<UnresolvedRow>,
    pub issues: Vec<RowIssue>,
}

impl Reconciliation {
    /// Issues that dropped an entire row.
    pub fn dropped_rows(&self) -> usize {
        self.issues.iter().filter(|i| i.reason.drops_row()).count()
    }

    /// Rows waiting on the resolution step.
    pub fn unresolved_rows(&self) -> usize {
        self.unresolved.iter().map(|u| u.row_numbers.len()).sum()
    }
}

enum Match<'a> {
    Found(&'a RosterEntry),
    Ambiguous(Vec<&'a RosterEntry>),
    Missing,
}

/// Narrows several candidates to one using a secondary signal from the row.
fn narrow<'a>(
    candidates: &[&'a RosterEntry],
    value: Option<&str>,
    key: impl Fn(&RosterEntry) -> Option<String>,
    normalize: impl Fn(&str) -> Option<String>,
) -> Option<&'a RosterEntry> {
    let wanted = value.and_then(normalize)?;
    let mut hits = candidates
        .iter()
        .copied()
        .filter(|entry| key(*entry).as_deref() == Some(wanted.as_str()));
    match (hits.next(), hits.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

fn match_row<'a>(
    index: &RosterIndex<'a>,
    key: &NameKey,
    row: &[String],
    mapping: &ColumnMapping,
) -> Match<'a> {
    let by_name = index.by_name(key);

    // Email and PIN only choose among same-name entries; a name miss is never
    // matched to a differently named athlete.
    match by_name.len() {
        0 => Match::Missing,
        1 => Match::Found(by_name[0]),
        _ => {
            let email = optional_cell(row, mapping.email_col);
            let pin = optional_cell(row, mapping.pin_col);
            narrow(&by_name, email, RosterEntry::email_key, roster_model::email_key)
                .or_else(|| narrow(&by_name, pin, RosterEntry::pin_key, roster_model::pin_key))
                .map_or(Match::Ambiguous(by_name), Match::Found)
        }
    }
}

/// Reconciles data rows (header excluded) against a roster snapshot.
///
/// Row numbers in the output are 1-based positions in `rows`. The function
/// performs no I/O and does not modify its inputs.
pub fn reconcile(
    rows: &[Vec<String>],
    mapping: &ColumnMapping,
    roster: &[RosterEntry],
    ctx: &ImportContext,
) -> Reconciliation {
    let index = RosterIndex::new(roster);
    let mut out = Reconciliation::default();
    let mut pending: HashMap<NameKey, usize> = HashMap::new();

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 1;
        let first = cell(row, mapping.first_name_col);
        let last = cell(row, mapping.last_name_col);
        if first.is_empty() || last.is_empty() {
            out.issues
                .push(RowIssue::new(row_number, SkipReason::MissingName));
            continue;
        }

        let key = NameKey::new(first, last);
        let athlete = match match_row(&index, &key, row, mapping) {
            Match::Found(entry) => entry,
            Match::Ambiguous(candidates) => {
                debug!(row_number, candidates = candidates.len(), "ambiguous athlete");
                out.issues.push(RowIssue::new(
                    row_number,
                    SkipReason::AmbiguousAthlete {
                        candidates: candidates.iter().map(|c| c.id.clone()).collect(),
                    },
                ));
                continue;
            }
            Match::Missing => {
                debug!(row_number, "no roster match");
                match pending.get(&key) {
                    Some(&slot) => out.unresolved[slot].row_numbers.push(row_number),
                    None => {
                        pending.insert(key, out.unresolved.len());
                        out.unresolved.push(UnresolvedRow {
                            first_name: first.to_string(),
                            last_name: last.to_string(),
                            raw_row: row.clone(),
                            row_numbers: vec![row_number],
                        });
                    }
                }
                continue;
            }
        };

        let recorded_date = match optional_cell(row, mapping.date_col) {
            Some(raw) => match parse_date(raw) {
                Some(date) => format_date(date),
                None => {
                    out.issues.push(RowIssue::new(
                        row_number,
                        SkipReason::InvalidDate {
                            value: raw.to_string(),
                        },
                    ));
                    continue;
                }
            },
            None => match ctx.default_date {
                Some(date) => format_date(date),
                None => {
                    out.issues
                        .push(RowIssue::new(row_number, SkipReason::MissingDate));
                    continue;
                }
            },
        };

        let notes = optional_cell(row, mapping.notes_col)
            .map(str::to_string)
            .or_else(|| ctx.default_notes.clone())
            .unwrap_or_default();

        let mut emitted = false;
        let mut had_value = false;
        for (&column, metric_id) in &mapping.metric_columns {
            let raw = cell(row, column);
            if raw.is_empty() {
                continue;
            }
            had_value = true;
            match parse_number(raw) {
                Some(value) => {
                    emitted = true;
                    out.resolved.push(ImportRecord {
                        athlete_id: athlete.id.clone(),
                        metric_id: metric_id.clone(),
                        value,
                        recorded_date: recorded_date.clone(),
                        notes: notes.clone(),
                    });
                }
                None => out.issues.push(RowIssue::new(
                    row_number,
                    SkipReason::InvalidNumber {
                        column,
                        metric_id: metric_id.clone(),
                        value: raw.to_string(),
                    },
                )),
            }
        }
        if !had_value {
            out.issues.push(RowIssue::new(row_number, SkipReason::NoValues));
        } else if !emitted {
            debug!(row_number, "every metric cell was invalid");
        }
    }

    info!(
        rows = rows.len(),
        records = out.resolved.len(),
        unresolved = out.unresolved.len(),
        issues = out.issues.len(),
        "reconciliation complete"
    );
    out
}
