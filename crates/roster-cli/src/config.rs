//! `roster.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use roster_store::UploadOptions;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    /// Root of the file-backed athlete store.
    pub store_dir: PathBuf,
    /// Organization used when `--org` is not passed.
    pub organization: Option<String>,
    /// Notes attached to records whose row has no notes cell.
    pub default_notes: Option<String>,
    pub upload: UploadOptions,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("roster-data"),
            organization: None,
            default_notes: None,
            upload: UploadOptions::default(),
        }
    }
}

impl RosterConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("parse roster config")?;
        if config.upload.batch_size == 0 {
            bail!("upload.batch_size must be at least 1");
        }
        if config.upload.max_in_flight == 0 {
            bail!("upload.max_in_flight must be at least 1");
        }
        Ok(config)
    }

    /// Loads `explicit`, or `roster.toml` in the working directory if present.
    ///
    /// A missing explicit path is an error; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("no roster.toml found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
