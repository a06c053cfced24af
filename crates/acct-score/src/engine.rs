//! Level/point scoring of accounts.

use std::collections::BTreeMap;

use acct_model::{AccountRecord, Criterion, Level, ScoreResult, Tier};
use tracing::debug;

/// Scores accounts against a fixed set of criteria.
///
/// Holds no state besides the criteria lookup, so one engine can score any
/// number of accounts, in any order.
#[derive(Debug, Clone)]
pub struct ScoringEngine<'a> {
    criteria: BTreeMap<&'a str, &'a Criterion>,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(criteria: &'a [Criterion]) -> Self {
        Self {
            criteria: criteria
                .iter()
                .map(|criterion| (criterion.id.as_str(), criterion))
                .collect(),
        }
    }

    /// Points one criterion contributes for `level`.
    ///
    /// Criteria missing from the engine contribute nothing.
    pub fn points(&self, criterion_id: &str, level: Level) -> u32 {
        match self.criteria.get(criterion_id) {
            Some(criterion) => criterion.points(level),
            None => {
                debug!(criterion = %criterion_id, "level for undefined criterion ignored");
                0
            }
        }
    }

    /// Sums the points of every scored criterion and derives the tier.
    pub fn score(&self, account: &AccountRecord) -> ScoreResult {
        let total_score = account
            .criterion_level
            .iter()
            .filter_map(|(criterion_id, level)| level.map(|level| self.points(criterion_id, level)))
            .fold(0u32, u32::saturating_add);
        ScoreResult {
            account_id: account.id.clone(),
            total_score,
            tier: Tier::from_score(total_score),
        }
    }

    pub fn score_all(&self, accounts: &[AccountRecord]) -> Vec<ScoreResult> {
        accounts.iter().map(|account| self.score(account)).collect()
    }
}

/// Scores a single account.
pub fn score(account: &AccountRecord, criteria: &[Criterion]) -> ScoreResult {
    ScoringEngine::new(criteria).score(account)
}
