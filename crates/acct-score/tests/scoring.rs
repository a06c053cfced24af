use acct_model::{AccountRecord, Criterion, Level, LevelPoints, Tier, WeightSet};
use acct_score::{ScoringEngine, TierSummary, all_scored, score, validate_weights};
use proptest::prelude::*;

fn criteria() -> Vec<Criterion> {
    vec![
        Criterion::new("fit", "Industry fit"),
        Criterion::new("budget", "Budget"),
        Criterion::new("intent", "Buying intent"),
    ]
}

fn account_with_total(total: u32) -> (AccountRecord, Vec<Criterion>) {
    // Split across two criteria so totals above 100 stay in range.
    let first = total.min(100);
    let second = total - first;
    let criteria = vec![
        Criterion::new("a", "A").with_levels(LevelPoints::new(0, 0, first).unwrap()),
        Criterion::new("b", "B").with_levels(LevelPoints::new(0, 0, second).unwrap()),
    ];
    let mut account = AccountRecord::new("X", "X").with_criteria(&criteria);
    account.set_level("a", Some(Level::High));
    account.set_level("b", Some(Level::High));
    (account, criteria)
}

#[test]
fn tier_boundaries_are_exact() {
    for (total, tier) in [
        (49, Tier::Low),
        (50, Tier::Medium),
        (99, Tier::Medium),
        (100, Tier::High),
    ] {
        let (account, criteria) = account_with_total(total);
        let result = score(&account, &criteria);
        assert_eq!(result.total_score, total);
        assert_eq!(result.tier, tier, "total {total}");
    }
}

#[test]
fn high_plus_low_is_medium_sixty() {
    let criteria = criteria();
    let mut account = AccountRecord::new("A-1", "Acme").with_criteria(&criteria);
    account.set_level("fit", Some(Level::High));
    account.set_level("budget", Some(Level::Low));

    let result = score(&account, &criteria);
    assert_eq!(result.total_score, 60);
    assert_eq!(result.tier, Tier::Medium);
}

#[test]
fn all_null_levels_score_zero() {
    let criteria = criteria();
    let account = AccountRecord::new("A-2", "Globex").with_criteria(&criteria);
    let result = score(&account, &criteria);
    assert_eq!(result.total_score, 0);
    assert_eq!(result.tier, Tier::Low);
    assert!(!all_scored(&[account]));
}

#[test]
fn summary_over_engine_results() {
    let criteria = criteria();
    let mut accounts: Vec<AccountRecord> = ["1", "2", "3"]
        .iter()
        .map(|id| AccountRecord::new(*id, "Acct").with_criteria(&criteria))
        .collect();
    for criterion in &criteria {
        accounts[0].set_level(&criterion.id, Some(Level::High));
        accounts[1].set_level(&criterion.id, Some(Level::Medium));
        accounts[2].set_level(&criterion.id, Some(Level::Low));
    }
    assert!(all_scored(&accounts));

    let results = ScoringEngine::new(&criteria).score_all(&accounts);
    let totals: Vec<u32> = results.iter().map(|r| r.total_score).collect();
    assert_eq!(totals, vec![150, 90, 30]);

    let summary = TierSummary::from_results(&results);
    assert_eq!((summary.high, summary.medium, summary.low), (1, 1, 1));
}

#[test]
fn weight_sets() {
    let valid = WeightSet::new()
        .with("firmographic", 40)
        .with("engagement", 35)
        .with("features", 25);
    let result = validate_weights(&valid);
    assert!(result.valid);
    assert_eq!(result.total, 100);

    let short = WeightSet::new()
        .with("firmographic", 40)
        .with("engagement", 35)
        .with("features", 20);
    let result = validate_weights(&short);
    assert!(!result.valid);
    assert_eq!(result.total, 95);
}

fn level_strategy() -> impl Strategy<Value = Option<Level>> {
    prop_oneof![
        Just(None),
        Just(Some(Level::Low)),
        Just(Some(Level::Medium)),
        Just(Some(Level::High)),
    ]
}

proptest! {
    #[test]
    fn total_is_sum_of_level_points(
        levels in prop::collection::vec(level_strategy(), 3),
        points in prop::collection::vec((0u32..=100, 0u32..=100, 0u32..=100), 3),
    ) {
        let criteria: Vec<Criterion> = criteria()
            .into_iter()
            .zip(&points)
            .map(|(c, (low, medium, high))| {
                c.with_levels(LevelPoints::new(*low, *medium, *high).unwrap())
            })
            .collect();
        let mut account = AccountRecord::new("P", "Prop").with_criteria(&criteria);
        for (criterion, level) in criteria.iter().zip(&levels) {
            account.set_level(&criterion.id, *level);
        }

        let expected: u32 = criteria
            .iter()
            .zip(&levels)
            .filter_map(|(c, level)| level.map(|level| c.points(level)))
            .sum();
        let first = score(&account, &criteria);
        prop_assert_eq!(first.total_score, expected);
        prop_assert_eq!(first.tier, Tier::from_score(expected));
        prop_assert_eq!(first, score(&account, &criteria));
    }

    #[test]
    fn validity_matches_total(values in prop::collection::vec(0i64..=100, 0..6)) {
        let weights = values
            .iter()
            .enumerate()
            .fold(WeightSet::new(), |set, (idx, value)| set.with(format!("c{idx}"), *value));
        let result = validate_weights(&weights);
        let total: i64 = values.iter().sum();
        prop_assert_eq!(result.total, total);
        prop_assert_eq!(result.valid, total == 100);
        prop_assert_eq!(result.deviation, total - 100);
    }
}
