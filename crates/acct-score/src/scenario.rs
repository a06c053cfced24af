//! Scoring scenario: the selected criteria, the column mapping and the
//! levels assigned to each account.
//!
//! Loaded from JSON:
//!
//! ```json
//! {
//!   "name": "Q3 expansion",
//!   "id_column": "Account ID",
//!   "criteria": [
//!     { "id": "fit", "label": "Industry fit" },
//!     { "id": "budget", "label": "Budget", "levels": { "low": 0, "medium": 20, "high": 40 } },
//!     { "id": "intent", "label": "Buying intent" }
//!   ],
//!   "levels": { "A-1": { "fit": "high", "budget": "low" } },
//!   "weights": { "firmographic": 40, "engagement": 35, "features": 25 }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use acct_model::{AccountRecord, Criterion, Level, MAX_POINTS, ModelError, RawTable, WeightSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ScoringError};

/// Fewest criteria a scenario may select.
pub const MIN_CRITERIA: usize = 3;
/// Most criteria a scenario may select.
pub const MAX_CRITERIA: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Identifier column; when absent the host uses the confirmed suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<String>,
    /// Display-name column; same fallback as `id_column`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_column: Option<String>,
    pub criteria: Vec<Criterion>,
    /// Account id -> criterion id -> level.
    #[serde(default)]
    pub levels: BTreeMap<String, BTreeMap<String, Level>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightSet>,
}

impl Scenario {
    /// A scenario with the given criteria and no levels yet.
    pub fn new(name: impl Into<String>, criteria: Vec<Criterion>) -> Result<Self> {
        let scenario = Self {
            name: name.into(),
            id_column: None,
            name_column: None,
            criteria,
            levels: BTreeMap::new(),
            weights: None,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks the criterion count, id and label uniqueness and point ranges.
    pub fn validate(&self) -> Result<()> {
        let count = self.criteria.len();
        if !(MIN_CRITERIA..=MAX_CRITERIA).contains(&count) {
            return Err(ScoringError::CriteriaCount {
                count,
                min: MIN_CRITERIA,
                max: MAX_CRITERIA,
            });
        }
        let mut seen = BTreeSet::new();
        let mut labels = BTreeSet::new();
        for criterion in &self.criteria {
            if !seen.insert(criterion.id.as_str()) {
                return Err(ScoringError::DuplicateCriterion(criterion.id.clone()));
            }
            // Labels become export column headers.
            if !labels.insert(criterion.label.as_str()) {
                return Err(ScoringError::DuplicateLabel(criterion.label.clone()));
            }
            // Deserialized point tables bypass the validated setters.
            if let Some(level) = Level::ALL
                .into_iter()
                .find(|level| criterion.points(*level) > MAX_POINTS)
            {
                return Err(ModelError::PointsOutOfRange {
                    level: level.to_string(),
                    value: i64::from(criterion.points(level)),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| criterion.id == id)
    }

    /// Builds one unscored account per table row.
    pub fn build_accounts(
        &self,
        table: &RawTable,
        id_column: &str,
        name_column: &str,
    ) -> Result<Vec<AccountRecord>> {
        for column in [id_column, name_column] {
            if !table.headers.iter().any(|header| header == column) {
                return Err(ScoringError::MissingColumn(column.to_string()));
            }
        }
        let accounts: Vec<AccountRecord> = table
            .sample_rows
            .iter()
            .map(|row| {
                AccountRecord::new(
                    RawTable::value(row, id_column),
                    RawTable::value(row, name_column),
                )
                .with_criteria(&self.criteria)
            })
            .collect();
        info!(
            scenario = %self.name,
            accounts = accounts.len(),
            criteria = self.criteria.len(),
            "accounts built"
        );
        Ok(accounts)
    }

    /// Applies the scenario's levels to `accounts` and returns how many
    /// levels were set.
    ///
    /// Every account sharing an id receives the levels.
    pub fn apply_levels(&self, accounts: &mut [AccountRecord]) -> Result<usize> {
        let mut applied = 0;
        for (account_id, levels) in &self.levels {
            let mut matched = false;
            for account in accounts.iter_mut().filter(|a| &a.id == account_id) {
                matched = true;
                for (criterion_id, level) in levels {
                    if self.criterion(criterion_id).is_none() {
                        return Err(ScoringError::UnknownCriterion(criterion_id.clone()));
                    }
                    account.set_level(criterion_id, Some(*level));
                    applied += 1;
                }
            }
            if !matched {
                return Err(ScoringError::UnknownAccount(account_id.clone()));
            }
        }
        debug!(applied, "levels applied");
        Ok(applied)
    }
}
