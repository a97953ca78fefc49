//! The fixed field list offered to users when mapping an upload.

use roster_model::{FieldKey, FieldSpec, MetricDefinition};

/// Built-in athlete and record fields, in display order.
pub fn builtin_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(FieldKey::FirstName, "First Name", true)
            .with_aliases(["first", "fname", "given name"]),
        FieldSpec::new(FieldKey::LastName, "Last Name", true)
            .with_aliases(["last", "lname", "surname", "family name"]),
        FieldSpec::new(FieldKey::Date, "Date", false).with_aliases([
            "test date",
            "recorded date",
            "date recorded",
        ]),
        FieldSpec::new(FieldKey::Email, "Email", false).with_aliases(["email address"]),
        FieldSpec::new(FieldKey::Pin, "PIN", false).with_aliases(["athlete pin"]),
        FieldSpec::new(FieldKey::Notes, "Notes", false).with_aliases(["note", "comments"]),
    ]
}

/// Built-in fields followed by one optional field per metric.
pub fn field_specs(metrics: &[MetricDefinition]) -> Vec<FieldSpec> {
    let mut fields = builtin_fields();
    for metric in metrics {
        let mut aliases = Vec::new();
        if !metric.unit.trim().is_empty() {
            aliases.push(format!("{} ({})", metric.name, metric.unit));
        }
        fields.push(
            FieldSpec::new(FieldKey::Metric(metric.id.clone()), metric.name.clone(), false)
                .with_aliases(aliases),
        );
    }
    fields
}

/// Finds a field by its key text or label, case-insensitively.
pub fn find_field<'a>(fields: &'a [FieldSpec], name: &str) -> Option<&'a FieldSpec> {
    let name = name.trim();
    fields
        .iter()
        .find(|f| f.key.as_key().eq_ignore_ascii_case(name))
        .or_else(|| fields.iter().find(|f| f.label.eq_ignore_ascii_case(name)))
}
