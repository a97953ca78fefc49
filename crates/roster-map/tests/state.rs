use roster_map::{MappingError, MappingState, field_specs, parse_override};
use roster_model::{FieldKey, MetricDefinition, MetricId};

fn state(raw: &[&str]) -> MappingState {
    let metrics = vec![MetricDefinition::new(
        MetricId::new("40yd").unwrap(),
        "40 Yard Dash",
        "s",
    )];
    MappingState::new(
        raw.iter().map(|s| (*s).to_string()).collect(),
        field_specs(&metrics),
    )
}

#[test]
fn converts_auto_mapping_to_column_mapping() {
    let state = state(&["First Name", "Last Name", "Date", "40 Yard Dash"]);
    let mapping = state.to_column_mapping().expect("complete mapping");
    assert_eq!(mapping.first_name_col, 0);
    assert_eq!(mapping.last_name_col, 1);
    assert_eq!(mapping.date_col, Some(2));
    assert_eq!(
        mapping.metric_columns.get(&3),
        Some(&MetricId::new("40yd").unwrap())
    );
}

#[test]
fn missing_required_fields_fail() {
    let state = state(&["Name", "40yd"]);
    let err = state.to_column_mapping().unwrap_err();
    assert_eq!(
        err,
        MappingError::MissingRequired(vec!["First Name".to_string(), "Last Name".to_string()])
    );
    let summary = state.summary();
    assert_eq!(summary.required_total, 2);
    assert_eq!(summary.required_mapped, 0);
    assert_eq!(summary.metric_columns, 1);
}

#[test]
fn assign_moves_field_between_columns() {
    let mut state = state(&["First Name", "Given", "Last Name"]);
    assert_eq!(state.field_for(0), Some(&FieldKey::FirstName));
    state.assign(1, FieldKey::FirstName).unwrap();
    assert_eq!(state.field_for(0), None);
    assert_eq!(state.field_for(1), Some(&FieldKey::FirstName));
    assert_eq!(state.unmapped_columns(), vec![0]);
}

#[test]
fn assign_rejects_bad_input() {
    let mut state = state(&["First Name", "Last Name"]);
    assert!(matches!(
        state.assign(9, FieldKey::Date),
        Err(MappingError::ColumnOutOfRange { index: 9, width: 2 })
    ));
    let unknown = FieldKey::Metric(MetricId::new("mile").unwrap());
    assert!(matches!(
        state.assign(0, unknown),
        Err(MappingError::UnknownField(_))
    ));
}

#[test]
fn header_overrides() {
    let mut state = state(&["First Name", "Last Name", "Time"]);
    assert_eq!(state.field_for(2), None);
    state.apply_override("time", "40yd").unwrap();
    assert_eq!(
        state.field_for(2),
        Some(&FieldKey::Metric(MetricId::new("40yd").unwrap()))
    );
    state.apply_override("Time", "skip").unwrap();
    assert_eq!(state.field_for(2), None);
    state.apply_override("Time", "Notes").unwrap();
    assert_eq!(state.field_for(2), Some(&FieldKey::Notes));
    assert!(matches!(
        state.apply_override("Nope", "date"),
        Err(MappingError::ColumnNotFound(_))
    ));
}

#[test]
fn override_parsing() {
    assert_eq!(
        parse_override(" 40 Yard = 40yd ").unwrap(),
        ("40 Yard".to_string(), "40yd".to_string())
    );
    assert!(parse_override("no-equals").is_err());
    assert!(parse_override("=date").is_err());
}
