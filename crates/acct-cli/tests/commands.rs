use std::fs;
use std::path::{Path, PathBuf};

use acct_cli::commands::{
    default_export_path, load_classifier_config, parse_weight, run_classify, run_score,
    run_weights,
};
use acct_map::{ClassifierConfig, SelectionState};
use acct_model::{RoleKind, Tier};
use tempfile::TempDir;

const ACCOUNTS: &str = "\
Account ID,Account Name,Industry,Notes
AC1001,Acme Corporation,Retail,
AC1002,Globex Industries,Banking,
AC1003,Initech Systems,Software,renewal
AC1004,Umbrella Holdings,Retail,
AC1005,Stark Enterprises,Energy,
AC1006,Wayne Group,Banking,
AC1007,Wonka Foods,Food,
AC1008,Hooli Cloud,Software,
AC1009,Vandelay Imports,Retail,
AC1010,Soylent Partners,Food,
";

const SCENARIO: &str = r#"{
    "name": "Q3 expansion",
    "criteria": [
        { "id": "fit", "label": "Industry fit" },
        { "id": "budget", "label": "Budget" },
        { "id": "intent", "label": "Buying intent" }
    ],
    "levels": {
        "AC1001": { "fit": "high", "budget": "high", "intent": "low" },
        "AC1002": { "fit": "medium", "budget": "low" }
    },
    "weights": { "firmographic": 40, "engagement": 35, "features": 20 }
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn classify_suggests_account_columns() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "accounts.csv", ACCOUNTS);

    let report = run_classify(&file, &ClassifierConfig::default()).unwrap();
    assert_eq!(report.sampled_rows, 10);
    assert_eq!(report.outcome.state, SelectionState::AwaitingSuggestionResponse);
    assert_eq!(
        report
            .outcome
            .identifier_suggestion
            .as_ref()
            .map(|s| s.field.as_str()),
        Some("Account ID")
    );
    assert_eq!(
        report
            .outcome
            .display_name_suggestion
            .as_ref()
            .map(|s| s.field.as_str()),
        Some("Account Name")
    );
    assert!(report
        .bucket_suggestions
        .iter()
        .any(|s| s.field == "Industry" && s.bucket == RoleKind::Firmographic));
    assert!(report.warnings.iter().any(|w| w.field == "Notes"));
}

#[test]
fn score_accepts_suggestions_and_writes_export() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "accounts.csv", ACCOUNTS);
    let scenario = write(dir.path(), "scenario.json", SCENARIO);

    let report = run_score(&file, &scenario, None, &ClassifierConfig::default()).unwrap();
    assert_eq!(report.mapping.identifier, "Account ID");
    assert_eq!(report.mapping.display_name, "Account Name");
    assert_eq!(report.rows.len(), 10);
    assert_eq!(report.rows[0].total_score, 110);
    assert_eq!(report.rows[0].tier, Tier::High);
    assert_eq!(report.rows[1].total_score, 40);
    assert_eq!(report.summary.high, 1);
    assert_eq!(report.summary.low, 9);
    assert!(!report.all_scored);
    assert_eq!(report.weights.map(|w| w.total), Some(95));

    assert_eq!(report.export_path, dir.path().join("accounts-scores.csv"));
    let export = fs::read_to_string(&report.export_path).unwrap();
    let mut lines = export.lines();
    assert_eq!(
        lines.next(),
        Some("AccountID,AccountName,TotalScore,Tier,Industry fit,Budget,Buying intent")
    );
    assert_eq!(lines.next(), Some("AC1001,Acme Corporation,110,High,50,50,10"));
}

#[test]
fn score_uses_column_overrides() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "accounts.csv", ACCOUNTS);
    let scenario = SCENARIO.replacen('{', r#"{ "name_column": "Industry","#, 1);
    let scenario = scenario.replace(r#""name": "Q3 expansion","#, r#""name": "Override","#);
    let scenario = write(dir.path(), "scenario.json", &scenario);
    let output = dir.path().join("out").join("scores.csv");

    let report = run_score(&file, &scenario, Some(&output), &ClassifierConfig::default()).unwrap();
    assert_eq!(report.mapping.identifier, "Account ID");
    assert_eq!(report.mapping.display_name, "Industry");
    assert_eq!(report.rows[0].account_name, "Retail");
    assert!(output.exists());
}

#[test]
fn score_without_confident_columns_asks_for_overrides() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "codes.csv", "c1,c2\nx,y\nx,y\n");
    let scenario = write(dir.path(), "scenario.json", SCENARIO);

    let error = run_score(&file, &scenario, None, &ClassifierConfig::default()).unwrap_err();
    assert!(error.to_string().contains("id_column"));
}

#[test]
fn classifier_config_file_is_optional() {
    assert_eq!(
        load_classifier_config(None).unwrap(),
        ClassifierConfig::default()
    );

    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "config.json", r#"{"confidence_threshold": 95}"#);
    let config = load_classifier_config(Some(&path)).unwrap();
    assert_eq!(config.confidence_threshold, 95.0);
    assert_eq!(config.sample_rows, 50);
}

#[test]
fn weights_arguments() {
    let args: Vec<String> = ["firmographic=40", "engagement=35%", "features=25"]
        .iter()
        .map(|arg| (*arg).to_string())
        .collect();
    let report = run_weights(&args).unwrap();
    assert!(report.validation.valid);
    assert_eq!(report.weights.0.get("engagement"), Some(&35));

    let short: Vec<String> = vec!["firmographic=40".into(), "engagement=35".into()];
    let report = run_weights(&short).unwrap();
    assert!(!report.validation.valid);
    assert_eq!(report.validation.total, 75);

    assert!(parse_weight("firmographic").is_err());
    assert!(parse_weight("=40").is_err());
    assert!(run_weights(&["engagement=35.5".to_string()]).is_err());
}

#[test]
fn repeated_weight_category_is_an_error() {
    let args = vec!["a=60".to_string(), "a=40".to_string()];
    let error = run_weights(&args).unwrap_err();
    assert!(error.to_string().contains("more than once"));
}

#[test]
fn export_path_defaults_beside_input() {
    assert_eq!(
        default_export_path(Path::new("/data/q3/accounts.csv")),
        PathBuf::from("/data/q3/accounts-scores.csv")
    );
}
