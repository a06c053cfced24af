//! Tier counts over scored accounts.

use acct_model::{AccountRecord, ScoreResult, Tier};
use serde::{Deserialize, Serialize};

/// Number of accounts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total_accounts: usize,
}

impl TierSummary {
    pub fn from_results(results: &[ScoreResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.tier {
                Tier::High => summary.high += 1,
                Tier::Medium => summary.medium += 1,
                Tier::Low => summary.low += 1,
            }
        }
        summary.total_accounts = results.len();
        summary
    }

    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::High => self.high,
            Tier::Medium => self.medium,
            Tier::Low => self.low,
        }
    }
}

/// True when every account has a level for every criterion it tracks.
/// An empty account list counts as scored.
pub fn all_scored(accounts: &[AccountRecord]) -> bool {
    accounts.iter().all(AccountRecord::is_fully_scored)
}
