//! Lookup tables over a roster snapshot.

use std::collections::HashMap;

use roster_model::{NameKey, RosterEntry};

/// Name index into a borrowed roster.
#[derive(Debug)]
pub struct RosterIndex<'a> {
    entries: &'a [RosterEntry],
    by_name: HashMap<NameKey, Vec<usize>>,
}

impl<'a> RosterIndex<'a> {
    pub fn new(entries: &'a [RosterEntry]) -> Self {
        let mut by_name: HashMap<NameKey, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let key = entry.name_key();
            if !key.is_incomplete() {
                by_name.entry(key).or_default().push(idx);
            }
        }
        Self { entries, by_name }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry whose name key equals `key`, in roster order.
    pub fn by_name(&self, key: &NameKey) -> Vec<&'a RosterEntry> {
        let entries = self.entries;
        self.by_name
            .get(key)
            .map(|idx| idx.iter().map(|&i| &entries[i]).collect())
            .unwrap_or_default()
    }
}
