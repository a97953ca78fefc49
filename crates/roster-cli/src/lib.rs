//! Library side of the roster import CLI.

pub mod config;
pub mod logging;
pub mod report;
pub mod summary;
