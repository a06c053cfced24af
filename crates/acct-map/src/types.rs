//! Suggestion types produced from classifier scores.

use acct_model::{RoleKind, RoleSuggestion};
use serde::{Deserialize, Serialize};

/// The bucket proposed for one field, with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSuggestion {
    pub field: String,
    pub bucket: RoleKind,
    /// Keyword weight on a 0..1 scale.
    pub confidence: f64,
    pub reason: String,
}

impl From<&BucketSuggestion> for RoleSuggestion {
    fn from(suggestion: &BucketSuggestion) -> Self {
        RoleSuggestion {
            field: suggestion.field.clone(),
            role: suggestion.bucket,
            confidence: suggestion.confidence,
        }
    }
}
