pub mod error;
pub mod profile;
pub mod role;
pub mod scoring;
pub mod table;

pub use error::{ModelError, Result};
pub use profile::ColumnProfile;
pub use role::{
    Namespace, RoleKind, RoleScore, RoleSuggestion, SINGLETON_SCORE_SCALE, Signal, SingletonRole,
};
pub use scoring::{
    AccountRecord, Criterion, Level, LevelPoints, MAX_POINTS, ScoreResult, Tier, WeightSet,
    parse_points,
};
pub use table::{DEFAULT_SAMPLE_ROWS, RawTable, Row};
