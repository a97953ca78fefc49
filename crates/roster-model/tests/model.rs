//! Tests for roster-model types.

use roster_model::{
    AthleteId, ColumnMapping, FieldKey, ImportRecord, MetricId, NameKey, RosterEntry, RowIssue,
    SkipReason, UnresolvedRow, cell, optional_cell,
};

fn athlete(id: &str) -> AthleteId {
    AthleteId::new(id).unwrap()
}

#[test]
fn name_key_is_case_insensitive_and_trimmed() {
    let a = NameKey::new("  Jane ", "DOE");
    let b = NameKey::new("jane", "doe");
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "jane doe");
}

#[test]
fn name_key_keeps_inner_whitespace_and_diacritics() {
    assert_ne!(NameKey::new("Mary Ann", "Lee"), NameKey::new("MaryAnn", "Lee"));
    assert_ne!(NameKey::new("José", "Ruiz"), NameKey::new("Jose", "Ruiz"));
}

#[test]
fn incomplete_name_key() {
    assert!(NameKey::new("", "Doe").is_incomplete());
    assert!(NameKey::new("Jane", "  ").is_incomplete());
    assert!(!NameKey::new("Jane", "Doe").is_incomplete());
}

#[test]
fn roster_entry_secondary_keys() {
    let entry = RosterEntry::new(athlete("1"), "A", "B")
        .with_email(" X@Y.com ")
        .with_pin(" 0042 ");
    assert_eq!(entry.email_key().as_deref(), Some("x@y.com"));
    assert_eq!(entry.pin_key().as_deref(), Some("0042"));

    let blank = RosterEntry::new(athlete("2"), "A", "B").with_email("  ");
    assert_eq!(blank.email_key(), None);
    assert_eq!(blank.pin_key(), None);
}

#[test]
fn roster_entry_deserializes_without_optional_fields() {
    let entry: RosterEntry =
        serde_json::from_str(r#"{"id":"1","first_name":"Jane","last_name":"Doe"}"#).unwrap();
    assert_eq!(entry.id.as_str(), "1");
    assert!(entry.email.is_none());
    assert!(entry.team_ids.is_empty());
}

#[test]
fn cell_helpers_handle_short_rows() {
    let row = vec!["Jane".to_string(), "  ".to_string()];
    assert_eq!(cell(&row, 0), "Jane");
    assert_eq!(cell(&row, 5), "");
    assert_eq!(optional_cell(&row, Some(1)), None);
    assert_eq!(optional_cell(&row, None), None);
    assert_eq!(optional_cell(&row, Some(0)), Some("Jane"));
}

#[test]
fn column_mapping_builder() {
    let mapping = ColumnMapping::new(0, 1)
        .with_date(2)
        .with_metric(3, MetricId::new("40yd").unwrap());
    assert_eq!(mapping.date_col, Some(2));
    assert_eq!(mapping.metric_columns.get(&3).map(MetricId::as_str), Some("40yd"));
    assert_eq!(mapping.email_col, None);
}

#[test]
fn field_key_text() {
    assert_eq!(FieldKey::FirstName.as_key(), "first_name");
    let metric = FieldKey::Metric(MetricId::new("vertical").unwrap());
    assert_eq!(metric.to_string(), "vertical");
    assert!(metric.is_metric());
}

#[test]
fn skip_reason_scope_and_display() {
    let cell_issue = SkipReason::InvalidNumber {
        column: 3,
        metric_id: MetricId::new("40yd").unwrap(),
        value: "dnf".to_string(),
    };
    assert!(!cell_issue.drops_row());
    assert!(SkipReason::MissingName.drops_row());
    let issue = RowIssue::new(4, cell_issue);
    assert_eq!(issue.to_string(), "row 4: 'dnf' for 40yd (column 4) is not a number");
}

#[test]
fn issue_serializes_with_kind_tag() {
    let issue = RowIssue::new(
        2,
        SkipReason::InvalidDate {
            value: "soon".to_string(),
        },
    );
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["reason"]["kind"], "invalid_date");
    assert_eq!(json["reason"]["value"], "soon");
}

#[test]
fn record_and_unresolved_round_trip_shapes() {
    let record = ImportRecord {
        athlete_id: athlete("1"),
        metric_id: MetricId::new("40yd").unwrap(),
        value: 10.2,
        recorded_date: "2024-01-05".to_string(),
        notes: String::new(),
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["athlete_id"], "1");
    assert_eq!(json["recorded_date"], "2024-01-05");

    let unresolved = UnresolvedRow {
        first_name: "Sam".to_string(),
        last_name: "Poe".to_string(),
        raw_row: vec!["Sam".to_string(), "Poe".to_string()],
        row_numbers: vec![1, 3],
    };
    assert_eq!(unresolved.name_key(), NameKey::new("sam", "POE"));
}
