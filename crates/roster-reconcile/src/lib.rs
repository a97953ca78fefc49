//! Reconciliation of imported rows against an athlete roster.

pub mod duplicates;
pub mod error;
pub mod index;
pub mod reconciler;
pub mod resolution;
pub mod session;
pub mod values;

pub use duplicates::{DuplicateGroup, MatchSignal, find_duplicate_groups, find_duplicates_in};
pub use error::{ReconcileError, Result};
pub use index::RosterIndex;
pub use reconciler::{Reconciliation, reconcile};
pub use resolution::{Resolution, ResolutionOutcome, new_athlete_from, resolve_unresolved};
pub use session::{ImportSession, SessionOutcome};
pub use values::{format_date, parse_date, parse_number};
