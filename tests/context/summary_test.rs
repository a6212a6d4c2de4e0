use dq_metadata::config::HeuristicRules;
use dq_metadata::context::{render_table_summary, TableProfile};
use dq_metadata::enrichment::EnrichmentEngine;
use dq_metadata::metadata::ColumnRecord;
use std::sync::Arc;

fn engine() -> EnrichmentEngine {
    let rules = HeuristicRules::from_toml_str(
        r#"
        pii_keywords = ["ssn"]
        candidate_key_patterns = ["_id"]
        temporal_patterns = ["_at"]
        high_cardinality_threshold = 0.9
        low_cardinality_threshold = 0.1
        "#,
    )
    .unwrap();
    EnrichmentEngine::new(Arc::new(rules))
}

fn columns(table: &str, specs: &[(&str, &str)]) -> Vec<ColumnRecord> {
    specs
        .iter()
        .map(|(name, ty)| ColumnRecord::new("billing", Some("public"), Some(table), *name, *ty))
        .collect()
}

#[test]
fn test_invoices_summary() {
    let cols = columns(
        "invoices",
        &[
            ("invoice_id", "integer"),
            ("customer_ssn", "varchar"),
            ("created_at", "timestamp"),
            ("amount", "numeric"),
        ],
    );

    let summary = render_table_summary(&engine(), "invoices", &cols);
    insta::assert_snapshot!(summary, @"Table invoices contains 4 columns: invoice_id, customer_ssn, created_at, amount. Primary candidate fields: invoice_id. Likely PII fields: customer_ssn(PII). Temporal fields: created_at.");
}

#[test]
fn test_summary_prefix_counts_every_column() {
    let engine = engine();
    let specs: Vec<(String, &str)> = (0..7).map(|i| (format!("col{i}"), "text")).collect();

    for n in 0..=specs.len() {
        let cols: Vec<ColumnRecord> = specs[..n]
            .iter()
            .map(|(name, ty)| ColumnRecord::new("app", Some("s"), Some("t"), name.as_str(), *ty))
            .collect();
        let summary = render_table_summary(&engine, "t", &cols);
        let prefix = format!("Table t contains {n} columns: ");
        assert!(
            summary.starts_with(&prefix),
            "{summary:?} does not start with {prefix:?}"
        );
    }
}

#[test]
fn test_plain_table_has_only_first_sentence() {
    let cols = columns("notes", &[("body", "text"), ("author", "varchar")]);
    let summary = render_table_summary(&engine(), "notes", &cols);
    assert_eq!(summary, "Table notes contains 2 columns: body, author.");
}

#[test]
fn test_clauses_follow_their_columns() {
    let engine = engine();

    let keys_only = columns("t", &[("user_id", "int")]);
    let summary = render_table_summary(&engine, "t", &keys_only);
    assert!(summary.contains("Primary candidate fields: user_id."));
    assert!(!summary.contains("Likely PII fields"));
    assert!(!summary.contains("Temporal fields"));

    let temporal_by_type = columns("t", &[("payload", "datetime")]);
    let summary = render_table_summary(&engine, "t", &temporal_by_type);
    assert!(summary.ends_with("Temporal fields: payload."));
    assert!(!summary.contains("Primary candidate fields"));
}

#[test]
fn test_clause_order_is_fixed() {
    // Temporal column listed first still renders after keys and PII.
    let cols = columns(
        "t",
        &[("updated_at", "text"), ("ssn", "text"), ("row_id", "text")],
    );
    let summary = render_table_summary(&engine(), "t", &cols);

    let keys = summary.find("Primary candidate fields").unwrap();
    let pii = summary.find("Likely PII fields").unwrap();
    let temporal = summary.find("Temporal fields").unwrap();
    assert!(keys < pii && pii < temporal);
}

#[test]
fn test_numeric_partition_excludes_keys() {
    let engine = engine();
    let cols = columns(
        "orders",
        &[
            ("order_id", "bigint"),
            ("total", "decimal(10,2)"),
            ("quantity", "int"),
            ("note", "text"),
            ("seq", "serial"),
        ],
    );

    let profile = TableProfile::build(&engine, "orders", &cols);
    assert_eq!(profile.primary_keys, vec!["order_id"]);
    // "serial" is not a numeric marker for summaries.
    assert_eq!(profile.numeric_fields, vec!["total", "quantity"]);
}

#[test]
fn test_blank_type_degrades_quietly() {
    let cols = columns("t", &[("mystery", "")]);
    let profile = TableProfile::build(&engine(), "t", &cols);
    assert!(profile.temporal_fields.is_empty());
    assert!(profile.numeric_fields.is_empty());
    assert_eq!(
        profile.render(),
        "Table t contains 1 columns: mystery."
    );
}
