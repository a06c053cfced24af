//! Data quality warnings for imported columns.

use acct_model::ColumnProfile;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Share of missing values above which a column is reported.
pub const MISSING_VALUE_WARNING_RATIO: f64 = 0.2;

/// A column whose missing-value share exceeds the warning ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityWarning {
    pub field: String,
    pub missing_ratio: f64,
}

impl QualityWarning {
    pub fn message(&self) -> String {
        format!(
            "Field \"{}\" has {:.1}% missing values",
            self.field,
            self.missing_ratio * 100.0
        )
    }
}

/// Reports columns with more than 20% missing values.
pub fn quality_warnings(profiles: &[ColumnProfile]) -> Vec<QualityWarning> {
    profiles
        .iter()
        .filter(|profile| profile.row_count > 0)
        .filter(|profile| profile.empty_ratio() > MISSING_VALUE_WARNING_RATIO)
        .map(|profile| {
            let warning = QualityWarning {
                field: profile.name.clone(),
                missing_ratio: profile.empty_ratio(),
            };
            warn!(field = %warning.field, "{}", warning.message());
            warning
        })
        .collect()
}
