use dq_metadata::config::HeuristicRules;
use dq_metadata::enrichment::{EnrichmentEngine, NormalizedType, SemanticRole, Sensitivity};
use dq_metadata::metadata::ColumnRecord;
use std::sync::Arc;

fn engine() -> EnrichmentEngine {
    let rules = HeuristicRules::from_file("config/heuristics.toml").unwrap();
    EnrichmentEngine::new(Arc::new(rules))
}

#[test]
fn test_normalize_common_types() {
    let engine = engine();
    let cases = [
        ("BIGINT", NormalizedType::Integer),
        ("serial", NormalizedType::Integer),
        ("NUMBER(10)", NormalizedType::Integer),
        ("varchar(255)", NormalizedType::String),
        ("TEXT", NormalizedType::String),
        ("double precision", NormalizedType::Float),
        ("numeric(12,2)", NormalizedType::Float),
        ("boolean", NormalizedType::Boolean),
        ("timestamp with time zone", NormalizedType::Datetime),
        ("DATE", NormalizedType::Datetime),
        ("jsonb", NormalizedType::Json),
        ("uuid", NormalizedType::Uuid),
        ("geometry", NormalizedType::Unknown),
        ("", NormalizedType::Unknown),
    ];
    for (raw, expected) in cases {
        assert_eq!(engine.normalize_datatype(raw), expected, "raw type {raw:?}");
    }
}

#[test]
fn test_normalize_priority_order() {
    let engine = engine();
    // "interval" contains "int"; integer rules are checked first.
    assert_eq!(engine.normalize_datatype("interval"), NormalizedType::Integer);
    assert_eq!(
        engine.normalize_datatype("character varying"),
        NormalizedType::String
    );
    assert_eq!(engine.normalize_datatype("DATETIME"), NormalizedType::Datetime);
}

#[test]
fn test_sensitivity_is_case_insensitive_substring() {
    let engine = engine();
    assert_eq!(
        engine.detect_sensitivity("Customer_SSN"),
        Some(Sensitivity::Pii)
    );
    assert_eq!(
        engine.detect_sensitivity("primary_email_address"),
        Some(Sensitivity::Pii)
    );
    assert_eq!(engine.detect_sensitivity("amount"), None);
    assert_eq!(engine.detect_sensitivity(""), None);
}

#[test]
fn test_candidate_keys() {
    let engine = engine();
    assert!(engine.is_candidate_key("invoice_id"));
    assert!(engine.is_candidate_key("CUSTOMER_KEY"));
    assert!(engine.is_candidate_key("row_uuid"));
    assert!(!engine.is_candidate_key("amount"));
    assert!(!engine.is_candidate_key("id"));
}

#[test]
fn test_temporal_by_type_or_name() {
    let engine = engine();
    assert!(engine.is_temporal("payload", "timestamp"));
    assert!(engine.is_temporal("created_at", "varchar"));
    assert!(engine.is_temporal("Updated", "text"));
    assert!(!engine.is_temporal("amount", "numeric"));
}

#[test]
fn test_semantic_role_precedence() {
    let engine = engine();
    assert_eq!(
        engine.determine_semantic_role("order_id", "timestamp"),
        SemanticRole::Key
    );
    assert_eq!(
        engine.determine_semantic_role("created_at", "bigint"),
        SemanticRole::Temporal
    );
    assert_eq!(
        engine.determine_semantic_role("amount", "decimal(10,2)"),
        SemanticRole::Measure
    );
    assert_eq!(
        engine.determine_semantic_role("status", "varchar"),
        SemanticRole::Attribute
    );
    assert_eq!(
        engine.determine_semantic_role("flag", "boolean"),
        SemanticRole::Attribute
    );
}

#[test]
fn test_classify_record() {
    let engine = engine();
    let column = ColumnRecord::new(
        "billing",
        Some("public"),
        Some("customers"),
        "customer_email",
        "varchar(320)",
    );

    let result = engine.classify_record(&column);
    assert_eq!(result.column_name, "customer_email");
    assert_eq!(result.normalized_type, NormalizedType::String);
    assert_eq!(result.sensitivity, Some(Sensitivity::Pii));
    assert!(!result.is_candidate_key);
    assert!(!result.is_temporal);
    assert_eq!(result.semantic_role, SemanticRole::Attribute);
}

#[test]
fn test_classification_serializes_lowercase_with_pii_marker() {
    let engine = engine();

    let pii = serde_json::to_value(engine.classify("customer_ssn", "char(11)")).unwrap();
    assert_eq!(pii["normalized_type"], "string");
    assert_eq!(pii["sensitivity"], "PII");
    assert_eq!(pii["semantic_role"], "attribute");

    let plain = serde_json::to_value(engine.classify("amount", "float8")).unwrap();
    assert!(plain.get("sensitivity").is_none());
    assert_eq!(plain["semantic_role"], "measure");
}

#[test]
fn test_engine_is_deterministic() {
    let engine = engine();
    let first = engine.classify("created_at", "timestamp");
    let second = engine.clone().classify("created_at", "timestamp");
    assert_eq!(first, second);
}
