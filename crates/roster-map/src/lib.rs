//! Column mapping for roster imports.
//!
//! [`auto_map`] suggests a default mapping from header names; [`MappingState`]
//! holds user overrides and produces the confirmed
//! [`ColumnMapping`](roster_model::ColumnMapping).

pub mod engine;
pub mod error;
pub mod fields;
pub mod state;
pub mod utils;

pub use engine::auto_map;
pub use error::{MappingError, Result};
pub use fields::{builtin_fields, field_specs, find_field};
pub use state::{MappingState, MappingSummary, parse_override};
pub use utils::normalize_header;
