use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_ingest::ColumnHint;
use roster_map::MappingState;
use roster_model::{MetricDefinition, RosterEntry};
use roster_reconcile::DuplicateGroup;

use crate::report::ImportReport;

pub fn print_import_summary(report: &ImportReport) {
    println!("File: {}", report.file.display());
    println!("Organization: {}", report.organization);
    if report.dry_run {
        println!("Dry run: nothing was written");
    }
    println!("{}", import_table(report));
    let details = issue_lines(report);
    if !details.is_empty() {
        println!();
        for line in details {
            println!("{line}");
        }
    }
}

pub fn import_table(report: &ImportReport) -> Table {
    let rec = &report.reconciliation;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Data rows"), Cell::new(report.rows)]);
    table.add_row(vec![Cell::new("Records prepared"), Cell::new(rec.resolved.len())]);
    table.add_row(vec![
        Cell::new("Athletes created"),
        count_cell(Some(report.created.len()), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unresolved athletes"),
        count_cell(Some(rec.unresolved.len()), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows dropped"),
        count_cell(Some(rec.dropped_rows()), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Cells skipped"),
        count_cell(Some(rec.issues.len() - rec.dropped_rows()), Color::Yellow),
    ]);
    match &report.upload {
        Some(upload) => {
            table.add_row(vec![
                Cell::new("Records inserted")
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
                Cell::new(upload.inserted).add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![
                Cell::new("Records failed"),
                count_cell(Some(upload.failed_records()), Color::Red),
            ]);
            table.add_row(vec![Cell::new("Retries"), dim_cell(upload.retries)]);
        }
        None => {
            table.add_row(vec![Cell::new("Records inserted"), dim_cell("-")]);
        }
    }
    table
}

/// Plain-text detail lines: ignored cells, dropped rows, unresolved names and
/// failed batches.
pub fn issue_lines(report: &ImportReport) -> Vec<String> {
    let rec = &report.reconciliation;
    let mut lines = Vec::new();
    if !report.truncated_rows.is_empty() {
        let rows: Vec<String> = report.truncated_rows.iter().map(ToString::to_string).collect();
        lines.push(format!(
            "Cells beyond the last header were ignored (rows {})",
            rows.join(", ")
        ));
    }
    if !rec.issues.is_empty() {
        lines.push("Skipped:".to_string());
        lines.extend(rec.issues.iter().map(|issue| format!("- {issue}")));
    }
    if !rec.unresolved.is_empty() {
        lines.push("Not on roster:".to_string());
        for row in &rec.unresolved {
            let rows: Vec<String> = row.row_numbers.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "- {} {} (rows {})",
                row.first_name,
                row.last_name,
                rows.join(", ")
            ));
        }
    }
    if let Some(upload) = &report.upload
        && !upload.failed_batches.is_empty()
    {
        lines.push("Failed batches:".to_string());
        for batch in &upload.failed_batches {
            lines.push(format!(
                "- batch {} ({} records, {} attempts): {}",
                batch.index + 1,
                batch.records,
                batch.attempts,
                batch.error
            ));
        }
    }
    lines
}

pub fn mapping_table(state: &MappingState, hints: &[ColumnHint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("Field"),
        header_cell("Numeric"),
        header_cell("Blank"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (col, header) in state.headers.iter().enumerate() {
        let field = match state.field_for(col) {
            Some(key) => Cell::new(key.as_key()).fg(Color::Blue),
            None => dim_cell("-"),
        };
        let (numeric, blank) = match hints.get(col) {
            Some(hint) => (percent(hint.numeric_ratio), percent(hint.null_ratio)),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(col + 1),
            Cell::new(header),
            field,
            Cell::new(numeric),
            Cell::new(blank),
        ]);
    }
    table
}

pub fn duplicates_table(groups: &[DuplicateGroup]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Email"),
        header_cell("PIN"),
        header_cell("Matched on"),
    ]);
    apply_table_style(&mut table);
    for (n, group) in groups.iter().enumerate() {
        let signals: Vec<String> = group.signals.iter().map(ToString::to_string).collect();
        for (i, member) in group.members.iter().enumerate() {
            let (group_cell, signal_cell) = if i == 0 {
                (
                    Cell::new(n + 1).add_attribute(Attribute::Bold),
                    Cell::new(signals.join(", ")).fg(Color::Yellow),
                )
            } else {
                (dim_cell(""), dim_cell(""))
            };
            table.add_row(vec![
                group_cell,
                Cell::new(member.id.as_str()),
                Cell::new(member.display_name()),
                optional_cell(member.email.as_deref()),
                optional_cell(member.pin.as_deref()),
                signal_cell,
            ]);
        }
    }
    table
}

pub fn athletes_table(athletes: &[RosterEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("First"),
        header_cell("Last"),
        header_cell("Email"),
        header_cell("PIN"),
    ]);
    apply_table_style(&mut table);
    for athlete in athletes {
        table.add_row(vec![
            Cell::new(athlete.id.as_str()),
            Cell::new(&athlete.first_name),
            Cell::new(&athlete.last_name),
            optional_cell(athlete.email.as_deref()),
            optional_cell(athlete.pin.as_deref()),
        ]);
    }
    table
}

pub fn metrics_table(metrics: &[MetricDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Unit"),
        header_cell("Better"),
    ]);
    apply_table_style(&mut table);
    for metric in metrics {
        table.add_row(vec![
            Cell::new(metric.id.as_str()),
            Cell::new(&metric.name),
            Cell::new(&metric.unit),
            Cell::new(if metric.lower_is_better { "lower" } else { "higher" }),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(v) if !v.trim().is_empty() => Cell::new(v),
        _ => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
