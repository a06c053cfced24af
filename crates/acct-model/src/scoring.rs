//! Criteria, accounts and the results of scoring them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Upper bound for any level's point value.
pub const MAX_POINTS: u32 = 100;

/// Qualitative rating of an account against one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ModelError::UnknownLevel(s.to_string())),
        }
    }
}

/// Points awarded for each level of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPoints {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl Default for LevelPoints {
    fn default() -> Self {
        Self {
            low: 10,
            medium: 30,
            high: 50,
        }
    }
}

impl LevelPoints {
    /// Validated constructor; every value must be in `[0, 100]`.
    pub fn new(low: u32, medium: u32, high: u32) -> Result<Self> {
        let mut points = Self::default();
        points.set(Level::Low, i64::from(low))?;
        points.set(Level::Medium, i64::from(medium))?;
        points.set(Level::High, i64::from(high))?;
        Ok(points)
    }

    pub const fn get(&self, level: Level) -> u32 {
        match level {
            Level::Low => self.low,
            Level::Medium => self.medium,
            Level::High => self.high,
        }
    }

    /// Updates one level; out-of-range values leave the table unchanged.
    pub fn set(&mut self, level: Level, value: i64) -> Result<()> {
        let points = u32::try_from(value)
            .ok()
            .filter(|points| *points <= MAX_POINTS)
            .ok_or_else(|| ModelError::PointsOutOfRange {
                level: level.to_string(),
                value,
            })?;
        match level {
            Level::Low => self.low = points,
            Level::Medium => self.medium = points,
            Level::High => self.high = points,
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        Level::ALL.iter().all(|level| self.get(*level) <= MAX_POINTS)
    }
}

/// Parses user-entered point text (e.g. from an edit box) as whole points.
pub fn parse_points(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ModelError::InvalidPoints(raw.to_string()))
}

/// A factor accounts are rated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub levels: LevelPoints,
}

impl Criterion {
    /// A criterion with the default 10 / 30 / 50 point table.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            levels: LevelPoints::default(),
        }
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelPoints) -> Self {
        self.levels = levels;
        self
    }

    pub fn points(&self, level: Level) -> u32 {
        self.levels.get(level)
    }

    pub fn set_points(&mut self, level: Level, value: i64) -> Result<()> {
        self.levels.set(level, value)
    }

    /// Applies a textual point edit; invalid text leaves the criterion as-is.
    pub fn edit_points(&mut self, level: Level, raw: &str) -> Result<()> {
        let value = parse_points(raw)?;
        self.set_points(level, value)
    }
}

/// An imported account and its per-criterion ratings.
///
/// A `None` level means the criterion has not been scored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub criterion_level: BTreeMap<String, Option<Level>>,
}

impl AccountRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            criterion_level: BTreeMap::new(),
        }
    }

    /// Adds every criterion as unscored.
    #[must_use]
    pub fn with_criteria<'a>(mut self, criteria: impl IntoIterator<Item = &'a Criterion>) -> Self {
        for criterion in criteria {
            self.criterion_level.insert(criterion.id.clone(), None);
        }
        self
    }

    pub fn set_level(&mut self, criterion_id: &str, level: Option<Level>) {
        self.criterion_level.insert(criterion_id.to_string(), level);
    }

    pub fn level(&self, criterion_id: &str) -> Option<Level> {
        self.criterion_level.get(criterion_id).copied().flatten()
    }

    /// True when every tracked criterion has a level.
    pub fn is_fully_scored(&self) -> bool {
        self.criterion_level.values().all(Option::is_some)
    }
}

/// Coarse priority bucket derived from a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Minimum total score for the High tier.
    pub const HIGH_MIN: u32 = 100;
    /// Minimum total score for the Medium tier.
    pub const MEDIUM_MIN: u32 = 50;

    /// Fixed step function: High >= 100, Medium 50..=99, Low below 50.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_MIN {
            Self::High
        } else if score >= Self::MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub account_id: String,
    pub total_score: u32,
    pub tier: Tier,
}

/// Percentage allocation across scoring categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightSet(pub BTreeMap<String, i64>);

impl WeightSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, category: impl Into<String>, percentage: i64) -> Self {
        self.0.insert(category.into(), percentage);
        self
    }

    /// Converts float inputs, rejecting any value that is not a whole percentage.
    pub fn from_floats<I, K>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut out = BTreeMap::new();
        for (category, value) in weights {
            let category = category.into();
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(ModelError::FractionalWeight { category, value });
            }
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            if value < i64::MIN as f64 || value >= i64::MAX as f64 {
                return Err(ModelError::WeightOutOfRange { category, value });
            }
            out.insert(category, value as i64);
        }
        Ok(Self(out))
    }

    /// Sum of all percentages, or `None` when it does not fit in an `i64`.
    pub fn checked_total(&self) -> Option<i64> {
        self.0
            .values()
            .try_fold(0i64, |total, value| total.checked_add(*value))
    }

    /// Sum of all percentages, clamped to the `i64` range.
    pub fn total(&self) -> i64 {
        self.0
            .values()
            .fold(0i64, |total, value| total.saturating_add(*value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
