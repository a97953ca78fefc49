use std::path::PathBuf;

use roster_cli::report::{ImportReport, UploadSummary};
use roster_cli::summary::{athletes_table, import_table, issue_lines};
use roster_model::{
    AthleteId, ImportRecord, MetricId, RosterEntry, RowIssue, SkipReason, UnresolvedRow,
};
use roster_reconcile::Reconciliation;
use roster_store::{FailedBatch, StoreError, UploadReport};

fn record(value: f64) -> ImportRecord {
    ImportRecord {
        athlete_id: AthleteId::new("1").unwrap(),
        metric_id: MetricId::new("40yd").unwrap(),
        value,
        recorded_date: "2024-01-05".to_string(),
        notes: String::new(),
    }
}

fn upload_report() -> UploadReport {
    UploadReport {
        batches: 2,
        inserted: 1,
        retries: 5,
        failed_batches: vec![FailedBatch {
            index: 1,
            records: 1,
            attempts: 6,
            error: StoreError::Unavailable("timeout".to_string()),
        }],
    }
}

fn sample_report() -> ImportReport {
    ImportReport {
        file: PathBuf::from("combine.csv"),
        organization: "north-high".to_string(),
        rows: 5,
        dry_run: false,
        truncated_rows: Vec::new(),
        reconciliation: Reconciliation {
            resolved: vec![record(4.8), record(4.9)],
            unresolved: vec![UnresolvedRow {
                first_name: "Sam".to_string(),
                last_name: "Lee".to_string(),
                raw_row: vec!["Sam".to_string(), "Lee".to_string()],
                row_numbers: vec![3, 5],
            }],
            issues: vec![
                RowIssue::new(2, SkipReason::MissingName),
                RowIssue::new(
                    4,
                    SkipReason::InvalidNumber {
                        column: 3,
                        metric_id: MetricId::new("40yd").unwrap(),
                        value: "dnf".to_string(),
                    },
                ),
            ],
        },
        created: Vec::new(),
        upload: Some(UploadSummary::from(&upload_report())),
    }
}

#[test]
fn issue_lines_snapshot() {
    let text = issue_lines(&sample_report()).join("\n");
    insta::assert_snapshot!(text, @r"
    Skipped:
    - row 2: first or last name is empty
    - row 4: 'dnf' for 40yd (column 4) is not a number
    Not on roster:
    - Sam Lee (rows 3, 5)
    Failed batches:
    - batch 2 (1 records, 6 attempts): backend unavailable: timeout
    ");
}

#[test]
fn ignored_cells_are_listed_first() {
    let mut report = sample_report();
    report.truncated_rows = vec![1, 4];
    let lines = issue_lines(&report);
    assert_eq!(lines[0], "Cells beyond the last header were ignored (rows 1, 4)");
    assert_eq!(lines[1], "Skipped:");
}

#[test]
fn clean_import_has_no_detail_lines() {
    let mut report = sample_report();
    report.reconciliation.issues.clear();
    report.reconciliation.unresolved.clear();
    report.upload = Some(UploadSummary::default());
    assert!(issue_lines(&report).is_empty());
    assert!(!report.has_failed_batches());
}

#[test]
fn failed_batches_set_the_failure_flag() {
    let report = sample_report();
    assert!(report.has_failed_batches());
    let upload = report.upload.as_ref().unwrap();
    assert_eq!(upload.failed_records(), 1);
    assert_eq!(upload.retries, 5);
}

#[test]
fn dry_run_never_reports_failed_batches() {
    let mut report = sample_report();
    report.dry_run = true;
    report.upload = None;
    assert!(!report.has_failed_batches());
    let table = import_table(&report).to_string();
    assert!(table.contains("Records prepared"));
    assert!(!table.contains("Retries"));
}

#[test]
fn import_table_lists_upload_rows() {
    let table = import_table(&sample_report()).to_string();
    for label in [
        "Data rows",
        "Records prepared",
        "Unresolved athletes",
        "Rows dropped",
        "Records inserted",
        "Records failed",
    ] {
        assert!(table.contains(label), "missing {label}");
    }
}

#[test]
fn report_json_flattens_errors_to_strings() {
    let value = serde_json::to_value(sample_report()).unwrap();
    assert_eq!(
        value["upload"]["failed_batches"][0]["error"],
        "backend unavailable: timeout"
    );
    assert_eq!(value["reconciliation"]["issues"][0]["reason"]["kind"], "missing_name");
    assert_eq!(value["reconciliation"]["resolved"][0]["value"], 4.8);
}

#[test]
fn athletes_table_shows_placeholders() {
    let roster = vec![
        RosterEntry::new(AthleteId::new("1").unwrap(), "Jane", "Doe").with_email("jane@x.com"),
    ];
    let table = athletes_table(&roster).to_string();
    assert!(table.contains("jane@x.com"));
    assert!(table.contains('-'));
}
