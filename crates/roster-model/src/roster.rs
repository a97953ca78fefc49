//! Roster identity records and the keys used to match them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::AthleteId;

/// A known athlete identity owned by the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: AthleteId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default)]
    pub team_ids: Vec<String>,
}

impl RosterEntry {
    pub fn new(id: AthleteId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            pin: None,
            team_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    /// Matching key derived from the entry's names.
    pub fn name_key(&self) -> NameKey {
        NameKey::new(&self.first_name, &self.last_name)
    }

    /// Lowercased email, or `None` when absent or blank.
    pub fn email_key(&self) -> Option<String> {
        self.email.as_deref().and_then(email_key)
    }

    /// Trimmed PIN, or `None` when absent or blank.
    pub fn pin_key(&self) -> Option<String> {
        self.pin.as_deref().and_then(pin_key)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Lowercase `(first, last)` pair used for roster matching.
///
/// Only surrounding whitespace is trimmed; inner whitespace and diacritics are
/// compared as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NameKey {
    pub first: String,
    pub last: String,
}

impl NameKey {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: first.trim().to_lowercase(),
            last: last.trim().to_lowercase(),
        }
    }

    /// True when either half of the name is empty.
    pub fn is_incomplete(&self) -> bool {
        self.first.is_empty() || self.last.is_empty()
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Normalizes an email for comparison.
pub fn email_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes a PIN for comparison.
pub fn pin_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Request payload for creating a roster entry during import resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAthlete {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default)]
    pub team_ids: Vec<String>,
}
