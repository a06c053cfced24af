//! Field roles and the explainable scores behind them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Points that map to a confidence of 1.0 for singleton role scores.
pub const SINGLETON_SCORE_SCALE: f64 = 100.0;

/// Semantic meaning a field can take in an imported account list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Identifier,
    DisplayName,
    Target,
    Engagement,
    Firmographic,
    Feature,
}

impl RoleKind {
    /// Bucket roles in suggestion precedence order.
    pub const BUCKETS: [RoleKind; 5] = [
        RoleKind::Identifier,
        RoleKind::Target,
        RoleKind::Engagement,
        RoleKind::Firmographic,
        RoleKind::Feature,
    ];

    /// Whether the role can be used as a bucket (DisplayName cannot).
    pub const fn is_bucket(self) -> bool {
        !matches!(self, Self::DisplayName)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identifier => "Account Identifier",
            Self::DisplayName => "Account Name",
            Self::Target => "Target Outcome",
            Self::Engagement => "Engagement Metrics",
            Self::Firmographic => "Firmographic Data",
            Self::Feature => "Additional Features",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two roles of which exactly one field may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingletonRole {
    Identifier,
    DisplayName,
}

impl SingletonRole {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Identifier => Self::DisplayName,
            Self::DisplayName => Self::Identifier,
        }
    }
}

impl From<SingletonRole> for RoleKind {
    fn from(role: SingletonRole) -> Self {
        match role {
            SingletonRole::Identifier => RoleKind::Identifier,
            SingletonRole::DisplayName => RoleKind::DisplayName,
        }
    }
}

impl fmt::Display for SingletonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RoleKind::from(*self).fmt(f)
    }
}

/// Which assignment namespace a score belongs to.
///
/// Singleton scores are additive points (threshold 30); bucket scores are
/// fixed keyword weights on a 0..1 scale. The two never compete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Singleton,
    Bucket,
}

/// One rule that contributed to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    /// Points added (negative for penalties).
    pub contribution: f64,
}

impl Signal {
    pub fn new(name: impl Into<String>, contribution: f64) -> Self {
        Self {
            name: name.into(),
            contribution,
        }
    }
}

/// Score of one field for one role, with its additive breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub field: String,
    pub role: RoleKind,
    pub namespace: Namespace,
    pub score: f64,
    pub signals: Vec<Signal>,
}

impl RoleScore {
    /// Builds a score whose value is the sum of its signals.
    pub fn from_signals(
        field: impl Into<String>,
        role: RoleKind,
        namespace: Namespace,
        signals: Vec<Signal>,
    ) -> Self {
        let score = signals.iter().map(|s| s.contribution).sum();
        Self {
            field: field.into(),
            role,
            namespace,
            score,
            signals,
        }
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.signals
            .iter()
            .map(|s| format!("{}: {:+.2}", s.name, s.contribution))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Normalised confidence in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        let raw = match self.namespace {
            Namespace::Singleton => self.score / SINGLETON_SCORE_SCALE,
            Namespace::Bucket => self.score,
        };
        raw.clamp(0.0, 1.0)
    }

    pub fn to_suggestion(&self) -> RoleSuggestion {
        RoleSuggestion {
            field: self.field.clone(),
            role: self.role,
            confidence: self.confidence(),
        }
    }
}

/// A role proposed for a field, ready to present for confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub field: String,
    pub role: RoleKind,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_sum_of_signals() {
        let score = RoleScore::from_signals(
            "Account ID",
            RoleKind::Identifier,
            Namespace::Singleton,
            vec![Signal::new("Header token", 20.0), Signal::new("Empty values", -4.0)],
        );
        assert!((score.score - 16.0).abs() < f64::EPSILON);
        assert_eq!(score.explain(), "Header token: +20.00; Empty values: -4.00");
    }

    #[test]
    fn confidence_depends_on_namespace() {
        let singleton = RoleScore::from_signals(
            "a",
            RoleKind::Identifier,
            Namespace::Singleton,
            vec![Signal::new("x", 150.0)],
        );
        assert_eq!(singleton.confidence(), 1.0);

        let bucket = RoleScore::from_signals(
            "a",
            RoleKind::Target,
            Namespace::Bucket,
            vec![Signal::new("x", 0.8)],
        );
        assert!((bucket.confidence() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn display_name_is_not_a_bucket() {
        assert!(!RoleKind::DisplayName.is_bucket());
        assert!(RoleKind::BUCKETS.iter().all(|role| role.is_bucket()));
        assert_eq!(SingletonRole::Identifier.other(), SingletonRole::DisplayName);
    }
}
