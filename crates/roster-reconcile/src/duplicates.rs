//! Duplicate-athlete detection over a roster.
//!
//! Entries are linked when they share a case-insensitive name, a non-empty
//! email, or a non-empty PIN. Groups are the connected components of those
//! links, so the grouping does not depend on roster order.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use roster_model::{ImportContext, RosterEntry};
use roster_store::AthleteDirectory;

/// What linked members of a [`DuplicateGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSignal {
    Name,
    Email,
    Pin,
}

impl std::fmt::Display for MatchSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Pin => "pin",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    /// Members in roster order.
    pub members: Vec<RosterEntry>,
    pub signals: BTreeSet<MatchSignal>,
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

fn buckets<K: Eq + Hash>(
    roster: &[RosterEntry],
    key: impl Fn(&RosterEntry) -> Option<K>,
) -> Vec<Vec<usize>> {
    let mut by_key: HashMap<K, Vec<usize>> = HashMap::new();
    for (idx, entry) in roster.iter().enumerate() {
        if let Some(k) = key(entry) {
            by_key.entry(k).or_default().push(idx);
        }
    }
    by_key.into_values().filter(|b| b.len() > 1).collect()
}

/// Groups roster entries that likely describe the same person.
///
/// Only groups with two or more members are returned, ordered by the
/// position of their first member.
pub fn find_duplicate_groups(roster: &[RosterEntry]) -> Vec<DuplicateGroup> {
    let links = [
        (
            MatchSignal::Name,
            buckets(roster, |e| Some(e.name_key()).filter(|k| !k.is_incomplete())),
        ),
        (MatchSignal::Email, buckets(roster, RosterEntry::email_key)),
        (MatchSignal::Pin, buckets(roster, RosterEntry::pin_key)),
    ];

    let mut sets = DisjointSet::new(roster.len());
    for (_, groups) in &links {
        for bucket in groups {
            for pair in bucket.windows(2) {
                sets.union(pair[0], pair[1]);
            }
        }
    }

    let mut signals: HashMap<usize, BTreeSet<MatchSignal>> = HashMap::new();
    for (signal, groups) in &links {
        for bucket in groups {
            let root = sets.find(bucket[0]);
            signals.entry(root).or_default().insert(*signal);
        }
    }

    let mut components: BTreeMap<usize, (usize, Vec<usize>)> = BTreeMap::new();
    for idx in 0..roster.len() {
        let root = sets.find(idx);
        components.entry(root).or_insert((idx, Vec::new())).1.push(idx);
    }

    let mut groups: Vec<(usize, DuplicateGroup)> = components
        .into_iter()
        .filter(|(_, (_, members))| members.len() > 1)
        .map(|(root, (first, members))| {
            (
                first,
                DuplicateGroup {
                    members: members.into_iter().map(|i| roster[i].clone()).collect(),
                    signals: signals.remove(&root).unwrap_or_default(),
                },
            )
        })
        .collect();
    groups.sort_by_key(|(first, _)| *first);

    debug!(
        entries = roster.len(),
        groups = groups.len(),
        "duplicate detection complete"
    );
    groups.into_iter().map(|(_, group)| group).collect()
}

/// Runs [`find_duplicate_groups`] over the organization's current roster.
pub fn find_duplicates_in<D: AthleteDirectory + ?Sized>(
    directory: &D,
    ctx: &ImportContext,
) -> roster_store::Result<Vec<DuplicateGroup>> {
    let roster = directory.list_athletes(ctx)?;
    Ok(find_duplicate_groups(&roster))
}
