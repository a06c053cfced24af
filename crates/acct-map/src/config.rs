//! Tunable classifier settings.

use acct_model::{DEFAULT_SAMPLE_ROWS, RoleKind};
use serde::{Deserialize, Serialize};

/// Singleton suggestions must score strictly above this many points.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 30.0;

/// Fixed score awarded when a bucket's keyword group matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketWeights {
    pub identifier: f64,
    pub target: f64,
    pub engagement: f64,
    pub firmographic: f64,
    pub feature: f64,
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            identifier: 0.9,
            target: 0.8,
            engagement: 0.85,
            firmographic: 0.85,
            feature: 0.7,
        }
    }
}

impl BucketWeights {
    /// Weight for a bucket role; `DisplayName` has none.
    pub fn get(&self, role: RoleKind) -> Option<f64> {
        match role {
            RoleKind::Identifier => Some(self.identifier),
            RoleKind::Target => Some(self.target),
            RoleKind::Engagement => Some(self.engagement),
            RoleKind::Firmographic => Some(self.firmographic),
            RoleKind::Feature => Some(self.feature),
            RoleKind::DisplayName => None,
        }
    }
}

/// Settings for classification and arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Points a singleton suggestion must exceed to be offered.
    pub confidence_threshold: f64,
    /// Rows sampled from the imported file.
    pub sample_rows: usize,
    pub bucket_weights: BucketWeights,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            bucket_weights: BucketWeights::default(),
        }
    }
}

impl ClassifierConfig {
    /// Parses a JSON config; missing keys take their defaults.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            ClassifierConfig::from_json(r#"{"bucket_weights":{"target":0.75}}"#).unwrap();
        assert_eq!(config.confidence_threshold, 30.0);
        assert_eq!(config.sample_rows, 50);
        assert_eq!(config.bucket_weights.target, 0.75);
        assert_eq!(config.bucket_weights.engagement, 0.85);
    }

    #[test]
    fn display_name_has_no_bucket_weight() {
        assert!(BucketWeights::default().get(RoleKind::DisplayName).is_none());
    }
}
