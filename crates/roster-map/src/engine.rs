//! Header auto-mapping.
//!
//! Matching is string equality only: first an exact (case-insensitive,
//! trimmed) match against a field's key, label or aliases, then the same
//! comparison on [`normalize_header`] forms. Each field is assigned to at
//! most one column and the left-most header wins.

use std::collections::{BTreeMap, BTreeSet};

use roster_model::{FieldKey, FieldSpec};
use tracing::debug;

use crate::utils::{exact_key, normalize_header};

fn spellings(field: &FieldSpec) -> impl Iterator<Item = &str> {
    [field.key.as_key(), field.label.as_str()]
        .into_iter()
        .chain(field.aliases.iter().map(String::as_str))
}

fn find_match<'a>(
    header: &str,
    fields: &'a [FieldSpec],
    assigned: &BTreeSet<FieldKey>,
    key_fn: fn(&str) -> String,
) -> Option<&'a FieldSpec> {
    let wanted = key_fn(header);
    if wanted.is_empty() {
        return None;
    }
    fields.iter().find(|field| {
        !assigned.contains(&field.key) && spellings(field).any(|s| key_fn(s) == wanted)
    })
}

/// Suggests a default column-index → field mapping for a header row.
pub fn auto_map(headers: &[String], fields: &[FieldSpec]) -> BTreeMap<usize, FieldKey> {
    let mut mapping = BTreeMap::new();
    let mut assigned = BTreeSet::new();

    for pass in [exact_key as fn(&str) -> String, normalize_header] {
        for (idx, header) in headers.iter().enumerate() {
            if mapping.contains_key(&idx) {
                continue;
            }
            if let Some(field) = find_match(header, fields, &assigned, pass) {
                debug!(column = idx, header = %header, field = %field.key, "auto-mapped column");
                assigned.insert(field.key.clone());
                mapping.insert(idx, field.key.clone());
            }
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use roster_model::{MetricDefinition, MetricId};

    use super::*;
    use crate::fields::field_specs;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn exact_match_beats_normalized_match() {
        let fields = field_specs(&[]);
        // "first-name" only matches after normalization; "First" is an exact alias.
        let mapping = auto_map(&headers(&["first-name", "First"]), &fields);
        assert_eq!(mapping.get(&1), Some(&FieldKey::FirstName));
        assert_eq!(mapping.get(&0), None);
    }

    #[test]
    fn metric_unit_alias() {
        let metric = MetricDefinition::new(MetricId::new("40yd").unwrap(), "40 Yard Dash", "s");
        let fields = field_specs(&[metric]);
        let mapping = auto_map(&headers(&["40 Yard Dash (s)"]), &fields);
        assert_eq!(
            mapping.get(&0),
            Some(&FieldKey::Metric(MetricId::new("40yd").unwrap()))
        );
    }
}
