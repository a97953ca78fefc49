use chrono::NaiveDate;
use roster_model::{
    AthleteId, ColumnMapping, ImportContext, MetricId, OrganizationId, RosterEntry, SkipReason,
};
use roster_reconcile::reconcile;

fn ctx() -> ImportContext {
    ImportContext::new(OrganizationId::new("org-1").unwrap())
}

fn id(raw: &str) -> AthleteId {
    AthleteId::new(raw).unwrap()
}

fn metric(raw: &str) -> MetricId {
    MetricId::new(raw).unwrap()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

fn jane() -> RosterEntry {
    RosterEntry::new(id("1"), "Jane", "Doe")
}

/// first, last, date, 40yd
fn basic_mapping() -> ColumnMapping {
    ColumnMapping::new(0, 1)
        .with_date(2)
        .with_metric(3, metric("40yd"))
}

#[test]
fn known_athlete_yields_record() {
    let rows = vec![row(&["Jane", "Doe", "2024-01-05", "10.2"])];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());

    assert!(out.unresolved.is_empty());
    assert!(out.issues.is_empty());
    assert_eq!(out.resolved.len(), 1);
    let record = &out.resolved[0];
    assert_eq!(record.athlete_id, id("1"));
    assert_eq!(record.metric_id, metric("40yd"));
    assert_eq!(record.value, 10.2);
    assert_eq!(record.recorded_date, "2024-01-05");
    assert_eq!(record.notes, "");
}

#[test]
fn name_match_ignores_case_and_outer_whitespace() {
    let rows = vec![row(&[" JANE ", "doe", "01/05/2024", "4.8"])];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());
    assert_eq!(out.resolved.len(), 1);
    assert_eq!(out.resolved[0].recorded_date, "2024-01-05");
}

#[test]
fn near_duplicate_names_do_not_match() {
    let rows = vec![row(&["Jane", "Doe Smith", "2024-01-05", "4.8"])];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());
    assert!(out.resolved.is_empty());
    assert_eq!(out.unresolved.len(), 1);
}

#[test]
fn missing_name_is_reported() {
    let rows = vec![
        row(&["", "Doe", "2024-01-05", "4.8"]),
        row(&["Jane", "  ", "2024-01-05", "4.8"]),
    ];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());

    assert!(out.resolved.is_empty());
    assert!(out.unresolved.is_empty());
    let rows_hit: Vec<usize> = out.issues.iter().map(|i| i.row_number).collect();
    assert_eq!(rows_hit, vec![1, 2]);
    assert!(out.issues.iter().all(|i| i.reason == SkipReason::MissingName));
}

#[test]
fn unknown_athletes_are_collected_once_per_name() {
    let rows = vec![
        row(&["Sam", "Lee", "2024-01-05", "5.0"]),
        row(&["Jane", "Doe", "2024-01-05", "4.8"]),
        row(&["sam", "LEE", "2024-01-06", "5.1"]),
        row(&["Ana", "Ruiz", "2024-01-06", "5.4"]),
    ];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());

    assert_eq!(out.resolved.len(), 1);
    assert_eq!(out.unresolved.len(), 2);
    assert_eq!(out.unresolved[0].first_name, "Sam");
    assert_eq!(out.unresolved[0].row_numbers, vec![1, 3]);
    assert_eq!(out.unresolved[0].raw_row, rows[0]);
    assert_eq!(out.unresolved[1].row_numbers, vec![4]);
    assert_eq!(out.unresolved_rows(), 3);
}

#[test]
fn invalid_date_drops_row() {
    let rows = vec![row(&["Jane", "Doe", "next week", "4.8"])];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());
    assert!(out.resolved.is_empty());
    assert_eq!(
        out.issues[0].reason,
        SkipReason::InvalidDate {
            value: "next week".to_string()
        }
    );
}

#[test]
fn blank_date_uses_default_or_reports() {
    let rows = vec![row(&["Jane", "Doe", "", "4.8"])];

    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());
    assert_eq!(out.issues[0].reason, SkipReason::MissingDate);
    assert_eq!(out.dropped_rows(), 1);

    let with_default = ctx().with_default_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &with_default);
    assert!(out.issues.is_empty());
    assert_eq!(out.resolved[0].recorded_date, "2024-02-01");
}

#[test]
fn invalid_number_skips_only_that_cell() {
    let mapping = basic_mapping().with_metric(4, metric("vert"));
    let rows = vec![row(&["Jane", "Doe", "2024-01-05", "dnf", "31.5"])];
    let out = reconcile(&rows, &mapping, &[jane()], &ctx());

    assert_eq!(out.resolved.len(), 1);
    assert_eq!(out.resolved[0].metric_id, metric("vert"));
    assert_eq!(out.issues.len(), 1);
    assert_eq!(
        out.issues[0].reason,
        SkipReason::InvalidNumber {
            column: 3,
            metric_id: metric("40yd"),
            value: "dnf".to_string(),
        }
    );
    assert_eq!(out.dropped_rows(), 0);
}

#[test]
fn all_blank_metrics_report_no_values() {
    let mapping = basic_mapping().with_metric(4, metric("vert"));
    let rows = vec![row(&["Jane", "Doe", "2024-01-05", "", ""])];
    let out = reconcile(&rows, &mapping, &[jane()], &ctx());
    assert!(out.resolved.is_empty());
    assert_eq!(out.issues[0].reason, SkipReason::NoValues);
}

#[test]
fn one_record_per_numeric_metric_cell() {
    let mapping = basic_mapping()
        .with_metric(4, metric("vert"))
        .with_metric(5, metric("bench"));
    let rows = vec![row(&["Jane", "Doe", "2024-01-05", "4.8", "", "12"])];
    let out = reconcile(&rows, &mapping, &[jane()], &ctx());
    let metrics: Vec<&str> = out.resolved.iter().map(|r| r.metric_id.as_str()).collect();
    assert_eq!(metrics, vec!["40yd", "bench"]);
    assert!(out.issues.is_empty());
}

#[test]
fn notes_come_from_column_then_default() {
    let mapping = basic_mapping().with_notes(4);
    let rows = vec![
        row(&["Jane", "Doe", "2024-01-05", "4.8", "wet track"]),
        row(&["Jane", "Doe", "2024-01-06", "4.7", ""]),
    ];
    let with_notes = ctx().with_default_notes("spring combine");
    let out = reconcile(&rows, &mapping, &[jane()], &with_notes);
    assert_eq!(out.resolved[0].notes, "wet track");
    assert_eq!(out.resolved[1].notes, "spring combine");
}

#[test]
fn email_disambiguates_shared_names() {
    let roster = vec![
        RosterEntry::new(id("1"), "Alex", "Kim").with_email("alex.a@example.com"),
        RosterEntry::new(id("2"), "Alex", "Kim").with_email("alex.b@example.com"),
    ];
    let mapping = basic_mapping().with_email(4);
    let rows = vec![
        row(&["Alex", "Kim", "2024-01-05", "5.0", "ALEX.B@example.com"]),
        row(&["Alex", "Kim", "2024-01-05", "5.2", ""]),
    ];
    let out = reconcile(&rows, &mapping, &roster, &ctx());

    assert_eq!(out.resolved.len(), 1);
    assert_eq!(out.resolved[0].athlete_id, id("2"));
    assert_eq!(out.issues.len(), 1);
    assert_eq!(out.issues[0].row_number, 2);
    assert_eq!(
        out.issues[0].reason,
        SkipReason::AmbiguousAthlete {
            candidates: vec![id("1"), id("2")]
        }
    );
}

#[test]
fn shared_pin_does_not_match_a_different_name() {
    let roster = vec![RosterEntry::new(id("1"), "Jane", "Doe").with_pin("1234")];
    let mapping = basic_mapping().with_pin(4);
    let rows = vec![
        row(&["Sam", "Lee", "2024-01-05", "5.0", "1234"]),
        row(&["Sam", "Lee", "2024-01-06", "5.1", ""]),
    ];
    let out = reconcile(&rows, &mapping, &roster, &ctx());

    assert!(out.resolved.is_empty());
    assert!(out.issues.is_empty());
    assert_eq!(out.unresolved.len(), 1);
    assert_eq!(out.unresolved[0].first_name, "Sam");
    assert_eq!(out.unresolved[0].row_numbers, vec![1, 2]);
}

#[test]
fn shared_email_does_not_match_a_different_name() {
    let roster =
        vec![RosterEntry::new(id("9"), "Katherine", "Jones").with_email("kj@example.com")];
    let mapping = basic_mapping().with_email(4);
    let rows = vec![row(&["Kate", "Jones", "2024-01-05", "6.1", "kj@example.com"])];
    let out = reconcile(&rows, &mapping, &roster, &ctx());

    assert!(out.resolved.is_empty());
    assert_eq!(out.unresolved.len(), 1);
    assert_eq!(out.unresolved[0].row_numbers, vec![1]);
}

#[test]
fn ragged_rows_read_missing_cells_as_blank() {
    let rows = vec![row(&["Jane", "Doe", "2024-01-05"])];
    let out = reconcile(&rows, &basic_mapping(), &[jane()], &ctx());
    assert_eq!(out.issues[0].reason, SkipReason::NoValues);
}

#[test]
fn inputs_are_not_modified() {
    let rows = vec![row(&["Jane", "Doe", "2024-01-05", "10.2"])];
    let roster = vec![jane()];
    let before = (rows.clone(), roster.clone());
    let first = reconcile(&rows, &basic_mapping(), &roster, &ctx());
    let second = reconcile(&rows, &basic_mapping(), &roster, &ctx());
    assert_eq!(first, second);
    assert_eq!((rows, roster), before);
}
