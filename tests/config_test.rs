use std::path::PathBuf;

use oneonone_insights::config::Config;
use oneonone_insights::config::rules::{DEFAULT_FRICTION_CATEGORIES, InsightRules};

// Env vars are process-global, so every env case lives in one test.
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("INSIGHTS_SOURCE");
        std::env::remove_var("INSIGHTS_SHEET");
        std::env::remove_var("INSIGHTS_RULES");
    }
    assert!(Config::from_env().is_err());

    // A CLI override stands in for the required var
    let config = Config::load(Some(PathBuf::from("meetings.xlsx"))).unwrap();
    assert_eq!(config.source, PathBuf::from("meetings.xlsx"));
    assert!(config.sheet.is_none());

    unsafe {
        std::env::set_var("INSIGHTS_SOURCE", "/data/one_on_ones.xlsx");
        std::env::set_var("INSIGHTS_SHEET", "Notes");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.source, PathBuf::from("/data/one_on_ones.xlsx"));
    assert_eq!(config.sheet.as_deref(), Some("Notes"));
    assert!(!config.log_level.is_empty());

    unsafe {
        std::env::remove_var("INSIGHTS_SOURCE");
        std::env::remove_var("INSIGHTS_SHEET");
    }
}

#[test]
fn default_rules_match_stock_rule_set() {
    let rules = InsightRules::default();
    assert_eq!(rules.next_deadlines, 3);
    assert_eq!(rules.friction_categories, DEFAULT_FRICTION_CATEGORIES.to_vec());
    assert!(rules.is_friction_category("Projects/Execution"));
    assert!(!rules.is_friction_category("Strategy"));
}

#[test]
fn rules_toml_overrides_only_given_fields() {
    let rules = InsightRules::from_toml(
        r#"
        [rules]
        next_deadlines = 5
        "#,
    )
    .unwrap();
    assert_eq!(rules.next_deadlines, 5);
    assert_eq!(rules.friction_categories.len(), 3);

    let empty = InsightRules::from_toml("").unwrap();
    assert_eq!(empty, InsightRules::default());
}

#[test]
fn rules_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(
        &path,
        "[rules]\nfriction_categories = [\"Strategy\"]\n",
    )
    .unwrap();

    let rules = InsightRules::load_or_default(Some(path.as_path())).unwrap();
    assert_eq!(rules.friction_categories, vec!["Strategy".to_string()]);
    assert_eq!(rules.next_deadlines, 3);
}

#[test]
fn malformed_rules_file_error_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, "[rules]\nnext_deadlines = -1\n").unwrap();

    match InsightRules::load(&path) {
        Err(oneonone_insights::Error::Config(msg)) => {
            assert!(msg.contains("rules.toml"), "message was {msg}");
            assert!(msg.contains("bad rules config"), "message was {msg}");
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn malformed_rules_are_config_errors() {
    assert!(InsightRules::from_toml("[rules]\nnext_deadlines = \"many\"").is_err());
    assert!(InsightRules::load(std::path::Path::new("/nonexistent/rules.toml")).is_err());
}
