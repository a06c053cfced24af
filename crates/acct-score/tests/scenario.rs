use acct_model::{Level, RawTable, Tier};
use acct_score::{Scenario, ScoringEngine, ScoringError, all_scored, validate_weights};

const SCENARIO: &str = r#"{
    "name": "Q3 expansion",
    "id_column": "Account ID",
    "criteria": [
        { "id": "fit", "label": "Industry fit" },
        { "id": "budget", "label": "Budget", "levels": { "low": 0, "medium": 20, "high": 40 } },
        { "id": "intent", "label": "Buying intent" }
    ],
    "levels": {
        "A-1": { "fit": "high", "budget": "high", "intent": "medium" },
        "A-2": { "fit": "low" }
    },
    "weights": { "firmographic": 40, "engagement": 35, "features": 25 }
}"#;

fn table() -> RawTable {
    RawTable::from_records(
        vec!["Account ID".to_string(), "Company".to_string()],
        vec![
            vec!["A-1".to_string(), "Acme Corp".to_string()],
            vec!["A-2".to_string(), "Globex".to_string()],
        ],
    )
}

#[test]
fn scenario_from_json_scores_accounts() {
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    assert_eq!(scenario.id_column.as_deref(), Some("Account ID"));
    assert_eq!(scenario.name_column, None);
    assert_eq!(scenario.criterion("fit").unwrap().points(Level::High), 50);
    assert_eq!(scenario.criterion("budget").unwrap().points(Level::High), 40);

    let mut accounts = scenario
        .build_accounts(&table(), "Account ID", "Company")
        .unwrap();
    assert_eq!(scenario.apply_levels(&mut accounts).unwrap(), 4);
    assert!(!all_scored(&accounts));

    let results = ScoringEngine::new(&scenario.criteria).score_all(&accounts);
    assert_eq!(results[0].total_score, 120);
    assert_eq!(results[0].tier, Tier::High);
    assert_eq!(results[1].total_score, 10);
    assert_eq!(results[1].tier, Tier::Low);

    let weights = scenario.weights.as_ref().unwrap();
    assert!(validate_weights(weights).valid);
}

#[test]
fn out_of_range_points_in_json_are_rejected() {
    let text = SCENARIO.replace(r#""high": 40"#, r#""high": 140"#);
    let err = Scenario::from_json(&text).unwrap_err();
    assert!(matches!(err, ScoringError::Model(_)));
    assert!(err.to_string().contains("between 0 and 100"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Scenario::from_json("{ \"name\": 3 }"),
        Err(ScoringError::ScenarioParse(_))
    ));
}
