//! Category weight validation.

use acct_model::WeightSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Total every weight set must reach.
pub const REQUIRED_WEIGHT_TOTAL: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightValidation {
    pub valid: bool,
    pub total: i64,
    /// `total - 100`; negative when the weights fall short.
    pub deviation: i64,
}

impl WeightValidation {
    /// User-facing message for an invalid set.
    pub fn message(&self) -> Option<String> {
        (!self.valid).then(|| {
            format!(
                "Weights total {}%; they must sum to {REQUIRED_WEIGHT_TOTAL}%",
                self.total
            )
        })
    }
}

/// Checks that the weights sum to exactly 100.
///
/// An invalid set is reported, not rejected; the caller decides whether to
/// block or warn.
///
/// A set whose sum overflows is invalid; its total is clamped.
pub fn validate_weights(weights: &WeightSet) -> WeightValidation {
    let checked = weights.checked_total();
    let total = checked.unwrap_or_else(|| weights.total());
    let deviation = total.saturating_sub(REQUIRED_WEIGHT_TOTAL);
    let validation = WeightValidation {
        valid: checked.is_some() && deviation == 0,
        total,
        deviation,
    };
    if !validation.valid {
        warn!(total, deviation, categories = weights.0.len(), "weights do not sum to 100");
    }
    validation
}
