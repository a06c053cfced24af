use std::path::PathBuf;

use acct_ingest::QualityWarning;
use acct_map::{ArbitrationOutcome, BucketSuggestion, PickFeedback, ResolvedMapping};
use acct_model::{RoleScore, WeightSet};
use acct_score::{ExportRow, TierSummary, WeightValidation};
use serde::Serialize;

/// Result of the `classify` command.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub file: PathBuf,
    pub headers: Vec<String>,
    pub sampled_rows: usize,
    pub outcome: ArbitrationOutcome,
    /// Highest identifier score, whether or not it cleared the threshold.
    pub best_identifier: Option<RoleScore>,
    pub best_display_name: Option<RoleScore>,
    pub bucket_suggestions: Vec<BucketSuggestion>,
    pub warnings: Vec<QualityWarning>,
}

/// Result of the `score` command.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub scenario: String,
    pub mapping: ResolvedMapping,
    pub feedback: Vec<PickFeedback>,
    pub criteria: Vec<String>,
    pub rows: Vec<ExportRow>,
    pub summary: TierSummary,
    pub all_scored: bool,
    pub weights: Option<WeightValidation>,
    pub export_path: PathBuf,
}

/// Result of the `weights` command.
#[derive(Debug, Clone, Serialize)]
pub struct WeightsReport {
    pub weights: WeightSet,
    pub validation: WeightValidation,
}
