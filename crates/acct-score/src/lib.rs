//! Account scoring: level/point totals, tiers, weight validation, scenarios
//! and the delimited export.

pub mod engine;
pub mod error;
pub mod export;
pub mod scenario;
pub mod summary;
pub mod weights;

pub use engine::{ScoringEngine, score};
pub use error::{Result, ScoringError};
pub use export::{
    ExportRow, FIXED_COLUMNS, export_header, export_rows, export_to_string, write_export,
    write_export_file,
};
pub use scenario::{MAX_CRITERIA, MIN_CRITERIA, Scenario};
pub use summary::{TierSummary, all_scored};
pub use weights::{REQUIRED_WEIGHT_TOTAL, WeightValidation, validate_weights};
