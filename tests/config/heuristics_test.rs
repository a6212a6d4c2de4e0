use dq_metadata::config::{HeuristicRuleStore, HeuristicRules, HeuristicsError};
use std::fs;
use std::sync::Arc;
use std::thread;

const RULES: &str = r#"
pii_keywords = ["SSN", "email"]
candidate_key_patterns = ["_id"]
temporal_patterns = ["_at", "date"]
high_cardinality_threshold = 0.9
low_cardinality_threshold = 0.1
"#;

#[test]
fn test_shipped_heuristics_are_valid() {
    let rules = HeuristicRules::from_file("config/heuristics.toml").unwrap();

    assert!(rules.pii_keywords.iter().any(|k| k == "ssn"));
    assert!(rules.pii_keywords.iter().any(|k| k == "email"));
    assert!(rules.candidate_key_patterns.iter().any(|p| p == "_id"));
    assert!(rules.temporal_patterns.iter().any(|p| p == "_at"));
    assert!(rules.low_cardinality_threshold <= rules.high_cardinality_threshold);
}

#[test]
fn test_store_loads_primary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heuristics.toml");
    fs::write(&path, RULES).unwrap();

    let store = HeuristicRuleStore::new(&path, None);
    assert!(!store.is_loaded());

    let rules = store.get_rules().unwrap();
    assert!(store.is_loaded());
    assert_eq!(rules.pii_keywords, vec!["ssn", "email"]);
}

#[test]
fn test_store_uses_fallback_when_primary_missing() {
    let dir = tempfile::tempdir().unwrap();
    let fallback = dir.path().join("fallback.toml");
    fs::write(&fallback, RULES).unwrap();

    let store = HeuristicRuleStore::new(dir.path().join("missing.toml"), Some(fallback));
    let rules = store.get_rules().unwrap();
    assert_eq!(rules.temporal_patterns, vec!["_at", "date"]);
}

#[test]
fn test_store_missing_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("a.toml");
    let fallback = dir.path().join("b.toml");

    let store = HeuristicRuleStore::new(&primary, Some(fallback.clone()));
    let err = store.get_rules().unwrap_err();

    match &err {
        HeuristicsError::FileNotFound { tried } => {
            assert_eq!(tried, &vec![primary.clone(), fallback.clone()]);
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("a.toml"));
    assert!(message.contains("b.toml"));

    // A failed load is not cached as an empty rule set.
    assert!(!store.is_loaded());
    assert!(store.get_rules().is_err());
}

#[test]
fn test_store_rejects_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heuristics.toml");
    fs::write(&path, "").unwrap();

    let store = HeuristicRuleStore::new(&path, None);
    assert!(matches!(
        store.get_rules(),
        Err(HeuristicsError::ParseError(_))
    ));
}

#[test]
fn test_store_rejects_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heuristics.toml");
    fs::write(&path, RULES.replace(r#"["_id"]"#, "[]")).unwrap();

    let err = HeuristicRuleStore::new(&path, None).get_rules().unwrap_err();
    assert!(matches!(
        err,
        HeuristicsError::EmptyList {
            field: "candidate_key_patterns"
        }
    ));
}

#[test]
fn test_concurrent_first_access_shares_one_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heuristics.toml");
    fs::write(&path, RULES).unwrap();

    let store = Arc::new(HeuristicRuleStore::new(&path, None));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.get_rules().unwrap())
        })
        .collect();

    let loaded: Vec<Arc<HeuristicRules>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    for rules in &loaded[1..] {
        assert!(Arc::ptr_eq(&loaded[0], rules));
    }
}

#[test]
fn test_loaded_rules_survive_file_removal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heuristics.toml");
    fs::write(&path, RULES).unwrap();

    let store = HeuristicRuleStore::new(&path, None);
    let first = store.get_rules().unwrap();
    fs::remove_file(&path).unwrap();

    let second = store.get_rules().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
