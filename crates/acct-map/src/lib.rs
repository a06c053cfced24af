//! Field role classification and suggestion arbitration.

pub mod arbiter;
pub mod classifier;
pub mod config;
pub mod error;
pub mod patterns;
pub mod state;
pub mod tokens;
pub mod types;

pub use arbiter::{
    ArbitrationOutcome, FeedbackStatus, PickFeedback, ResolvedMapping, SelectionState,
    SuggestionArbiter, arbitrate,
};
pub use classifier::{FieldRoleClassifier, best_singleton, bucket_suggestions, classify};
pub use config::{BucketWeights, ClassifierConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use error::SelectionError;
pub use state::{AssignmentSummary, FieldAssignments, FieldStatus};
pub use types::BucketSuggestion;
